//! # Editor State
//!
//! An immutable snapshot of a document: the node arena, the tree structure
//! and the selection.
//!
//! Nodes are stored behind `Arc`, so cloning a state is shallow. An update
//! works on such a clone and copies a node only when it is first written
//! (see [`crate::Update`]). Every other node stays shared with the committed
//! version it came from.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use vellum_model::{DocumentNode, Node, NodeKey, NodeType, RootNode, SerializedNode, SerializedRootNode};

/// A position inside the document.
///
/// In a text node `offset` counts characters; in an element node it is a
/// child index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub key: NodeKey,
    pub offset: usize,
}

impl Point {
    pub fn new(key: NodeKey, offset: usize) -> Self {
        Self { key, offset }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: Point,
    pub focus: Point,
}

impl Selection {
    /// Collapsed selection at `point`
    pub fn caret(point: Point) -> Self {
        Self {
            anchor: point.clone(),
            focus: point,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }
}

/// `{ "root": { "type": "root", ... } }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedEditorState {
    pub root: SerializedNode,
}

#[derive(Debug, Clone)]
pub struct EditorState {
    pub(crate) nodes: HashMap<NodeKey, Arc<Node>>,
    pub(crate) children: HashMap<NodeKey, Vec<NodeKey>>,
    pub(crate) parents: HashMap<NodeKey, NodeKey>,
    pub(crate) selection: Option<Selection>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    /// Empty document holding only the root
    pub fn new() -> Self {
        let root = NodeKey::root();
        let mut nodes = HashMap::new();
        nodes.insert(root.clone(), Arc::new(Node::Root(RootNode::new())));
        let mut children = HashMap::new();
        children.insert(root, Vec::new());

        Self {
            nodes,
            children,
            parents: HashMap::new(),
            selection: None,
        }
    }

    pub fn get_node(&self, key: &NodeKey) -> Option<&Node> {
        self.nodes.get(key).map(Arc::as_ref)
    }

    pub fn contains(&self, key: &NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Child keys of an element node, empty for leaves
    pub fn children(&self, key: &NodeKey) -> &[NodeKey] {
        self.children.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn root_children(&self) -> &[NodeKey] {
        self.children(&NodeKey::root())
    }

    pub fn parent(&self, key: &NodeKey) -> Option<&NodeKey> {
        self.parents.get(key)
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Number of nodes, the root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the root has no children
    pub fn is_empty(&self) -> bool {
        self.root_children().is_empty()
    }

    /// Whether `key` refers to the same stored node in both states
    pub fn shares_node_with(&self, other: &EditorState, key: &NodeKey) -> bool {
        match (self.nodes.get(key), other.nodes.get(key)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Attached nodes of one type, in document order
    pub fn nodes_of_type(&self, node_type: NodeType) -> Vec<&Node> {
        self.descendants(&NodeKey::root())
            .into_iter()
            .filter_map(|key| self.get_node(&key))
            .filter(|node| node.node_type() == node_type)
            .collect()
    }

    /// Keys below `key` in document order
    pub fn descendants(&self, key: &NodeKey) -> Vec<NodeKey> {
        let mut out = Vec::new();
        self.collect_descendants(key, &mut out);
        out
    }

    fn collect_descendants(&self, key: &NodeKey, out: &mut Vec<NodeKey>) {
        for child in self.children(key) {
            out.push(child.clone());
            self.collect_descendants(child, out);
        }
    }

    /// Plain text of the document: blocks joined by blank lines
    pub fn text_content(&self) -> String {
        self.root_children()
            .iter()
            .map(|key| self.subtree_text(key))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn subtree_text(&self, key: &NodeKey) -> String {
        let mut text = self
            .get_node(key)
            .map(|node| node.text_content())
            .unwrap_or_default();
        for child in self.children(key) {
            text.push_str(&self.subtree_text(child));
        }
        text
    }

    /// JSON record tree rooted at the root node
    pub fn to_serialized(&self) -> SerializedEditorState {
        let root = self.export_node(&NodeKey::root()).unwrap_or_else(|| {
            SerializedNode::Root(SerializedRootNode {
                children: Vec::new(),
                direction: None,
                format: Default::default(),
                indent: 0,
                version: 1,
            })
        });
        SerializedEditorState { root }
    }

    fn export_node(&self, key: &NodeKey) -> Option<SerializedNode> {
        let mut record = self.get_node(key)?.export_json();
        if let Some(children) = record.children_mut() {
            children.extend(self.children(key).iter().filter_map(|child| self.export_node(child)));
        }
        Some(record)
    }

    /// Drop nodes no longer reachable from the root
    pub(crate) fn collect_garbage(&mut self) -> Vec<NodeKey> {
        let mut reachable: HashSet<NodeKey> = self.descendants(&NodeKey::root()).into_iter().collect();
        reachable.insert(NodeKey::root());

        let removed: Vec<NodeKey> = self
            .nodes
            .keys()
            .filter(|key| !reachable.contains(*key))
            .cloned()
            .collect();

        for key in &removed {
            self.nodes.remove(key);
            self.children.remove(key);
            self.parents.remove(key);
        }

        if let Some(selection) = &self.selection {
            if !reachable.contains(&selection.anchor.key) || !reachable.contains(&selection.focus.key) {
                self.selection = None;
            }
        }

        removed
    }
}
