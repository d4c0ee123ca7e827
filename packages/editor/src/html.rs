//! HTML export and import.
//!
//! Export walks the tree and asks each node for its markup. Import runs the
//! registered DOM conversions over a parsed fragment and reshapes the result
//! into a valid document:
//!
//! ```text
//! <div>hi<p>a<video data-lexical-Video="v.mp4">b</p></div>
//!   → paragraph("hi"), paragraph("a"), Video, paragraph("b")
//! ```

use crate::errors::EditorError;
use crate::state::EditorState;
use crate::update::Update;
use tracing::trace;
use vellum_markup::{DomElement, DomNode};
use vellum_model::{DocumentNode, DomConversionMap, DomConversionOutput, Node, NodeKey, ParagraphNode, TextNode};

/// Markup for every top-level block of `state`
pub fn export_html(state: &EditorState) -> String {
    let nodes: Vec<DomNode> = state
        .root_children()
        .iter()
        .filter_map(|key| export_subtree(state, key))
        .collect();
    vellum_markup::serialize(&nodes)
}

fn export_subtree(state: &EditorState, key: &NodeKey) -> Option<DomNode> {
    let mut dom = state.get_node(key)?.export_dom();
    if let DomNode::Element(element) = &mut dom {
        for child in state.children(key) {
            if let Some(child) = export_subtree(state, child) {
                element.children.push(child);
            }
        }
    }
    Some(dom)
}

/// A converted node with its converted children, not yet in any arena
#[derive(Debug)]
pub(crate) struct ImportedNode {
    node: Node,
    children: Vec<ImportedNode>,
}

impl ImportedNode {
    fn leaf(node: impl Into<Node>) -> Self {
        Self {
            node: node.into(),
            children: Vec::new(),
        }
    }

    /// Add this node and its subtree under `parent`
    pub(crate) fn attach(self, update: &mut Update<'_>, parent: &NodeKey) -> Result<NodeKey, EditorError> {
        let key = update.create_node(self.node)?;
        update.append(parent, &key)?;
        for child in self.children {
            child.attach(update, &key)?;
        }
        Ok(key)
    }
}

/// Convert a parsed fragment into top-level blocks
pub(crate) fn import_dom(dom: &[DomNode], conversions: &DomConversionMap) -> Vec<ImportedNode> {
    let mut blocks = Vec::new();
    let mut inline = Vec::new();

    for node in convert_nodes(dom, conversions) {
        if node.node.is_inline() {
            inline.push(node);
        } else {
            flush_inline(&mut inline, &mut blocks);
            place_block(node, &mut blocks);
        }
    }
    flush_inline(&mut inline, &mut blocks);
    blocks
}

fn convert_nodes(dom: &[DomNode], conversions: &DomConversionMap) -> Vec<ImportedNode> {
    let mut out = Vec::new();
    for node in dom {
        convert_node(node, conversions, &mut out);
    }
    out
}

fn convert_node(dom: &DomNode, conversions: &DomConversionMap, out: &mut Vec<ImportedNode>) {
    match dom {
        DomNode::Text { content } => {
            // Whitespace that only lays out the markup carries no content
            if content.trim().is_empty() && content.contains('\n') {
                return;
            }
            out.push(ImportedNode::leaf(TextNode::new(content.clone())));
        }
        DomNode::Element(element) => match convert_element(element, conversions) {
            Some(node) => {
                let children = if node.can_have_children() {
                    convert_nodes(&element.children, conversions)
                } else {
                    Vec::new()
                };
                out.push(ImportedNode { node, children });
            }
            None => out.extend(convert_nodes(&element.children, conversions)),
        },
    }
}

fn convert_element(element: &DomElement, conversions: &DomConversionMap) -> Option<Node> {
    let conversion = conversions.find_conversion(element)?;
    match (conversion.conversion)(element) {
        Some(DomConversionOutput { node: Some(node) }) => Some(node),
        _ => {
            trace!(tag = %element.tag, "element consumed without a node");
            None
        }
    }
}

fn flush_inline(inline: &mut Vec<ImportedNode>, blocks: &mut Vec<ImportedNode>) {
    if inline.is_empty() {
        return;
    }
    blocks.push(ImportedNode {
        node: ParagraphNode::new().into(),
        children: std::mem::take(inline),
    });
}

fn place_block(node: ImportedNode, blocks: &mut Vec<ImportedNode>) {
    if node.node.can_have_children() {
        hoist_blocks(node, blocks);
    } else {
        blocks.push(node);
    }
}

/// Lift blocks nested in an element up to the top level, splitting the
/// element around them. Fragments left empty by a split are dropped.
fn hoist_blocks(element: ImportedNode, blocks: &mut Vec<ImportedNode>) {
    let ImportedNode { node, children } = element;
    let format = node.format().unwrap_or_default();
    let mut current = Some(ImportedNode::leaf(node));
    let mut split = false;

    for child in children {
        if child.node.is_inline() {
            current
                .get_or_insert_with(|| ImportedNode::leaf(ParagraphNode::new().with_format(format)))
                .children
                .push(child);
        } else {
            split = true;
            if let Some(fragment) = current.take() {
                if !fragment.children.is_empty() {
                    blocks.push(fragment);
                }
            }
            place_block(child, blocks);
        }
    }

    if let Some(fragment) = current {
        if !split || !fragment.children.is_empty() {
            blocks.push(fragment);
        }
    }
}
