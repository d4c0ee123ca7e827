//! # Update Transactions
//!
//! Every change to a document happens inside an [`Update`]. The update owns
//! a pending copy of the committed [`EditorState`]; the editor swaps it in
//! when the update closure returns `Ok` and throws it away otherwise.
//!
//! ## Copy on write
//!
//! ```text
//! committed:  root ─ p1 ─ t1        (Arc<Node> each)
//!                  └ v1
//!
//! pending:    root ─ p1 ─ t1        same Arcs
//!                  └ v1'            get_writable(v1) → Arc::make_mut
//! ```
//!
//! `get_writable` clones a node the first time it is written in an update and
//! hands back the private copy on every later call.

use crate::errors::EditorError;
use crate::state::{EditorState, Point, Selection};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;
use vellum_model::{
    DocumentNode, ElementFormat, Node, NodeError, NodeKey, NodeStore, NodeType, ParagraphNode,
    SerializedNode,
};

pub struct Update<'a> {
    state: EditorState,
    registered: &'a HashSet<NodeType>,
    dirty: HashSet<NodeKey>,
}

impl<'a> Update<'a> {
    pub(crate) fn new(state: EditorState, registered: &'a HashSet<NodeType>) -> Self {
        Self {
            state,
            registered,
            dirty: HashSet::new(),
        }
    }

    pub(crate) fn into_parts(self) -> (EditorState, HashSet<NodeKey>) {
        (self.state, self.dirty)
    }

    /// The pending state as seen so far in this update
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn root_key(&self) -> NodeKey {
        NodeKey::root()
    }

    pub fn is_registered(&self, node_type: NodeType) -> bool {
        self.registered.contains(&node_type)
    }

    pub fn children(&self, key: &NodeKey) -> &[NodeKey] {
        self.state.children(key)
    }

    pub fn parent(&self, key: &NodeKey) -> Option<&NodeKey> {
        self.state.parent(key)
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.state.selection()
    }

    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.state.selection = selection;
    }

    /// Caret at the start of `key`: the first text child when there is one
    pub fn select_start(&mut self, key: &NodeKey) {
        let point = match self.state.children(key).first() {
            Some(first) if matches!(self.state.get_node(first), Some(Node::Text(_))) => {
                Point::new(first.clone(), 0)
            }
            _ => Point::new(key.clone(), 0),
        };
        self.state.selection = Some(Selection::caret(point));
    }

    fn mark_dirty(&mut self, key: &NodeKey) {
        self.dirty.insert(key.clone());
    }

    fn require(&self, key: &NodeKey) -> Result<&Node, EditorError> {
        self.state
            .get_node(key)
            .ok_or_else(|| EditorError::Node(NodeError::NodeNotFound(key.clone())))
    }

    /// Add a detached node to the arena. It must be attached with
    /// [`append`](Self::append) or an insert before the update ends, or it is
    /// dropped at commit.
    pub fn create_node(&mut self, node: impl Into<Node>) -> Result<NodeKey, EditorError> {
        let node = node.into();
        let node_type = node.node_type();
        if !self.is_registered(node_type) {
            return Err(EditorError::NodeNotRegistered {
                owner: "create_node",
                node_type,
            });
        }
        if node.is_root() {
            return Err(EditorError::structure("a document has exactly one root"));
        }

        let key = node.key().clone();
        if self.state.contains(&key) {
            return Err(EditorError::DuplicateKey(key));
        }

        if node.can_have_children() {
            self.state.children.insert(key.clone(), Vec::new());
        }
        self.state.nodes.insert(key.clone(), Arc::new(node));
        self.mark_dirty(&key);
        Ok(key)
    }

    /// Root accepts blocks, other elements accept inline nodes
    fn check_placement(&self, parent: &NodeKey, child: &NodeKey) -> Result<(), EditorError> {
        let parent_node = self.require(parent)?;
        let child_node = self.require(child)?;

        if child_node.is_root() {
            return Err(EditorError::structure("the root cannot be moved"));
        }
        if !parent_node.can_have_children() {
            return Err(EditorError::structure(format!(
                "{} node {} cannot have children",
                parent_node.node_type(),
                parent
            )));
        }
        if parent_node.is_root() == child_node.is_inline() {
            let expected = if parent_node.is_root() { "block" } else { "inline" };
            return Err(EditorError::structure(format!(
                "{} node {} is not a valid child of {} node {}: expected a {} node",
                child_node.node_type(),
                child,
                parent_node.node_type(),
                parent,
                expected
            )));
        }

        let mut ancestor = Some(parent);
        while let Some(current) = ancestor {
            if current == child {
                return Err(EditorError::structure(format!(
                    "node {} cannot be placed inside itself",
                    child
                )));
            }
            ancestor = self.state.parent(current);
        }
        Ok(())
    }

    fn detach(&mut self, key: &NodeKey) {
        if let Some(parent) = self.state.parents.remove(key) {
            if let Some(siblings) = self.state.children.get_mut(&parent) {
                siblings.retain(|sibling| sibling != key);
            }
            self.mark_dirty(&parent);
        }
    }

    fn place(&mut self, parent: &NodeKey, index: usize, child: &NodeKey) {
        if let Some(siblings) = self.state.children.get_mut(parent) {
            let index = index.min(siblings.len());
            siblings.insert(index, child.clone());
        }
        self.state.parents.insert(child.clone(), parent.clone());
        self.mark_dirty(parent);
        self.mark_dirty(child);
    }

    /// Position of `key` among its siblings
    pub fn index_within_parent(&self, key: &NodeKey) -> Result<usize, EditorError> {
        let parent = self
            .state
            .parent(key)
            .ok_or_else(|| EditorError::structure(format!("node {} is not attached", key)))?;
        self.state
            .children(parent)
            .iter()
            .position(|sibling| sibling == key)
            .ok_or_else(|| EditorError::structure(format!("node {} missing from its parent", key)))
    }

    /// Move `child` to the end of `parent`
    pub fn append(&mut self, parent: &NodeKey, child: &NodeKey) -> Result<(), EditorError> {
        self.check_placement(parent, child)?;
        self.detach(child);
        let end = self.state.children(parent).len();
        self.place(parent, end, child);
        Ok(())
    }

    pub fn insert_before(&mut self, sibling: &NodeKey, node: &NodeKey) -> Result<(), EditorError> {
        self.insert_next_to(sibling, node, 0)
    }

    pub fn insert_after(&mut self, sibling: &NodeKey, node: &NodeKey) -> Result<(), EditorError> {
        self.insert_next_to(sibling, node, 1)
    }

    fn insert_next_to(&mut self, sibling: &NodeKey, node: &NodeKey, shift: usize) -> Result<(), EditorError> {
        if sibling == node {
            return Err(EditorError::structure(format!(
                "node {} cannot be its own sibling",
                node
            )));
        }
        let parent = self
            .state
            .parent(sibling)
            .cloned()
            .ok_or_else(|| EditorError::structure(format!("node {} is not attached", sibling)))?;
        self.check_placement(&parent, node)?;
        self.detach(node);
        let index = self.index_within_parent(sibling)? + shift;
        self.place(&parent, index, node);
        Ok(())
    }

    /// Detach `key` and drop it with its subtree
    pub fn remove(&mut self, key: &NodeKey) -> Result<(), EditorError> {
        if key.is_root() {
            return Err(EditorError::structure("the root cannot be removed"));
        }
        self.require(key)?;
        self.detach(key);

        for removed in std::iter::once(key.clone()).chain(self.state.descendants(key)) {
            self.state.nodes.remove(&removed);
            self.state.children.remove(&removed);
            self.state.parents.remove(&removed);
            self.dirty.remove(&removed);
        }

        let selection_removed = self.state.selection.as_ref().is_some_and(|selection| {
            !self.state.contains(&selection.anchor.key) || !self.state.contains(&selection.focus.key)
        });
        if selection_removed {
            self.state.selection = None;
        }
        Ok(())
    }

    /// Remove every child of the root
    pub fn clear(&mut self) -> Result<(), EditorError> {
        let children = self.state.root_children().to_vec();
        for child in &children {
            self.remove(child)?;
        }
        self.state.selection = None;
        Ok(())
    }

    pub fn set_format(&mut self, key: &NodeKey, format: ElementFormat) -> Result<(), EditorError> {
        Node::set_format(self, key, format)?;
        Ok(())
    }

    /// Split a text node at a character offset. The tail becomes the next
    /// sibling; its key is returned.
    pub fn split_text(&mut self, key: &NodeKey, offset: usize) -> Result<NodeKey, EditorError> {
        let tail = match self.get_writable(key)? {
            Node::Text(text) => text.split_off(offset)?,
            _ => {
                return Err(EditorError::Node(NodeError::TypeMismatch {
                    key: key.clone(),
                    expected: "text",
                }))
            }
        };
        let tail_key = self.create_node(tail)?;
        self.insert_after(key, &tail_key)?;
        Ok(tail_key)
    }

    /// Split a top-level element at child index `offset`. Children from
    /// `offset` on move into a new element of the same kind inserted right
    /// after; its key is returned even when it ends up empty.
    pub fn split_block(&mut self, key: &NodeKey, offset: usize) -> Result<NodeKey, EditorError> {
        let node = self.require(key)?;
        let format = match node {
            Node::Paragraph(paragraph) => paragraph.format(),
            other => {
                return Err(EditorError::structure(format!(
                    "cannot split {} node {}",
                    other.node_type(),
                    key
                )))
            }
        };
        if !self.state.parent(key).is_some_and(NodeKey::is_root) {
            return Err(EditorError::structure(format!(
                "node {} is not a top-level block",
                key
            )));
        }

        let right = self.create_node(ParagraphNode::new().with_format(format))?;
        self.insert_after(key, &right)?;

        let moved: Vec<NodeKey> = self.state.children(key).iter().skip(offset).cloned().collect();
        for child in &moved {
            self.append(&right, child)?;
        }
        Ok(right)
    }

    /// Insert a block node at the nearest valid position to the selection.
    ///
    /// - Caret on the root: the node goes in at that child index and the caret
    ///   moves just past it.
    /// - Caret in a text or paragraph: the enclosing block is split at the
    ///   caret, the node goes between the halves and the caret moves to the
    ///   start of the second half.
    /// - Caret on another block: the node goes right after it.
    /// - No selection: the node is appended to the root and followed by an
    ///   empty paragraph, which receives the caret.
    pub fn insert_node_to_nearest_root(&mut self, node: impl Into<Node>) -> Result<NodeKey, EditorError> {
        let node = node.into();
        if node.is_inline() {
            return Err(EditorError::structure(format!(
                "{} nodes cannot be inserted at the root",
                node.node_type()
            )));
        }
        let key = self.create_node(node)?;
        let root = self.root_key();

        let Some(selection) = self.state.selection.clone() else {
            self.append(&root, &key)?;
            let paragraph = self.create_node(ParagraphNode::new())?;
            self.insert_after(&key, &paragraph)?;
            self.select_start(&paragraph);
            debug!(node = %key, "inserted at end of document");
            return Ok(key);
        };

        let focus = selection.focus;
        let focus_node = self.require(&focus.key)?;
        let focus_is_root = focus_node.is_root();
        let focus_is_leaf_block = !focus_node.can_have_children() && !focus_node.is_inline();
        let focus_text_length = focus_node.as_text().map(|text| text.char_len());

        if focus_is_root {
            match self.state.children(&root).get(focus.offset).cloned() {
                Some(sibling) => self.insert_before(&sibling, &key)?,
                None => self.append(&root, &key)?,
            }
            let index = self.index_within_parent(&key)?;
            self.set_selection(Some(Selection::caret(Point::new(root, index + 1))));
            debug!(node = %key, index, "inserted at root offset");
            return Ok(key);
        }

        if focus_is_leaf_block {
            self.insert_after(&focus.key, &key)?;
            let index = self.index_within_parent(&key)?;
            self.set_selection(Some(Selection::caret(Point::new(root, index + 1))));
            debug!(node = %key, after = %focus.key, "inserted after block");
            return Ok(key);
        }

        let (block, offset) = match focus_text_length {
            Some(length) => {
                if focus.offset > length {
                    return Err(EditorError::Node(NodeError::OffsetOutOfRange {
                        key: focus.key.clone(),
                        offset: focus.offset,
                    }));
                }
                let parent = self
                    .state
                    .parent(&focus.key)
                    .cloned()
                    .ok_or_else(|| EditorError::structure(format!("node {} is not attached", focus.key)))?;
                let mut index = self.index_within_parent(&focus.key)?;
                if focus.offset > 0 {
                    index += 1;
                    if focus.offset < length {
                        self.split_text(&focus.key, focus.offset)?;
                    }
                }
                (parent, index)
            }
            None => (focus.key.clone(), focus.offset),
        };

        let right = self.split_block(&block, offset)?;
        self.insert_before(&right, &key)?;
        self.select_start(&right);
        debug!(node = %key, split = %block, "inserted by splitting block");
        Ok(key)
    }

    /// Build nodes from a JSON record and append them under `parent`
    pub fn import_record(&mut self, parent: &NodeKey, record: &SerializedNode) -> Result<NodeKey, EditorError> {
        let node = Node::import_json(record);
        let node_type = node.node_type();
        if !self.is_registered(node_type) {
            return Err(EditorError::NodeNotRegistered {
                owner: "import",
                node_type,
            });
        }

        let key = self.create_node(node)?;
        self.append(parent, &key)?;
        for child in record.children() {
            self.import_record(&key, child)?;
        }
        Ok(key)
    }
}

impl NodeStore for Update<'_> {
    fn get_node(&self, key: &NodeKey) -> Option<&Node> {
        self.state.get_node(key)
    }

    fn get_writable(&mut self, key: &NodeKey) -> Result<&mut Node, NodeError> {
        let slot = self
            .state
            .nodes
            .get_mut(key)
            .ok_or_else(|| NodeError::NodeNotFound(key.clone()))?;
        self.dirty.insert(key.clone());
        Ok(Arc::make_mut(slot))
    }
}
