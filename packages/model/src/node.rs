use crate::conversion::DomConversionMap;
use crate::decoration::Decoration;
use crate::error::NodeError;
use crate::format::ElementFormat;
use crate::key::NodeKey;
use crate::nodes::{ParagraphNode, RootNode, TextNode, VideoNode};
use crate::serialized::SerializedNode;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::fmt;
use vellum_markup::DomNode;

/// Runtime type tag of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    #[serde(rename = "root")]
    Root,
    #[serde(rename = "paragraph")]
    Paragraph,
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "Video")]
    Video,
}

impl NodeType {
    /// Types every editor knows without registration
    pub const BUILTIN: [NodeType; 3] = [NodeType::Root, NodeType::Paragraph, NodeType::Text];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Root => "root",
            NodeType::Paragraph => "paragraph",
            NodeType::Text => "text",
            NodeType::Video => "Video",
        }
    }

    /// DOM conversions contributed by this type
    pub fn import_dom(self) -> DomConversionMap {
        match self {
            NodeType::Root => RootNode::import_dom(),
            NodeType::Paragraph => ParagraphNode::import_dom(),
            NodeType::Text => TextNode::import_dom(),
            NodeType::Video => VideoNode::import_dom(),
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conversion and rendering contract shared by every node type
pub trait DocumentNode {
    fn key(&self) -> &NodeKey;

    fn node_type(&self) -> NodeType;

    /// Plain-text form of this node alone, without children
    fn text_content(&self) -> String;

    /// JSON record of this node. Element records come back with no
    /// children; the editor fills them in from the tree.
    fn export_json(&self) -> SerializedNode;

    /// Markup form of this node alone, without children
    fn export_dom(&self) -> DomNode;

    /// Matchers that turn markup back into this node type
    fn import_dom() -> DomConversionMap
    where
        Self: Sized;

    /// Whether an already-rendered node can be patched in place after
    /// changing from `previous`. `false` makes the host render it afresh.
    fn update_dom(&self, previous: &Self) -> bool
    where
        Self: Sized;

    fn is_inline(&self) -> bool {
        false
    }

    fn can_have_children(&self) -> bool {
        false
    }

    /// Render description for decorator nodes
    fn decorate(&self, _theme: &Theme) -> Option<Decoration> {
        None
    }
}

/// Write access to nodes owned by a document.
///
/// `get_writable` returns a copy private to the current update, so changes
/// never leak into document versions other readers may still hold.
pub trait NodeStore {
    fn get_node(&self, key: &NodeKey) -> Option<&Node>;

    fn get_writable(&mut self, key: &NodeKey) -> Result<&mut Node, NodeError>;
}

/// A document node
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Root(RootNode),
    Paragraph(ParagraphNode),
    Text(TextNode),
    Video(VideoNode),
}

impl Node {
    /// Build a node from its record. Nested children are ignored.
    pub fn import_json(record: &SerializedNode) -> Node {
        match record {
            SerializedNode::Root(_) => Node::Root(RootNode::new()),
            SerializedNode::Paragraph(paragraph) => {
                Node::Paragraph(ParagraphNode::import_json(paragraph))
            }
            SerializedNode::Text(text) => Node::Text(TextNode::import_json(text)),
            SerializedNode::Video(video) => Node::Video(VideoNode::import_json(video)),
        }
    }

    pub fn as_video(&self) -> Option<&VideoNode> {
        match self {
            Node::Video(video) => Some(video),
            _ => None,
        }
    }

    pub fn as_video_mut(&mut self) -> Option<&mut VideoNode> {
        match self {
            Node::Video(video) => Some(video),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextNode> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextNode> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_paragraph(&self) -> Option<&ParagraphNode> {
        match self {
            Node::Paragraph(paragraph) => Some(paragraph),
            _ => None,
        }
    }

    /// Block alignment, for node types that have one
    pub fn format(&self) -> Option<ElementFormat> {
        match self {
            Node::Paragraph(paragraph) => Some(paragraph.format()),
            Node::Video(video) => Some(video.format()),
            Node::Root(_) | Node::Text(_) => None,
        }
    }

    /// Change the alignment of the node stored under `key`
    pub fn set_format<S>(store: &mut S, key: &NodeKey, format: ElementFormat) -> Result<(), NodeError>
    where
        S: NodeStore + ?Sized,
    {
        match store.get_writable(key)? {
            Node::Paragraph(paragraph) => paragraph.format = format,
            Node::Video(video) => video.block.format = format,
            Node::Root(_) | Node::Text(_) => return Err(NodeError::NotFormattable(key.clone())),
        }
        Ok(())
    }

    pub fn is_decorator(&self) -> bool {
        matches!(self, Node::Video(_))
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Node::Root(_))
    }
}

macro_rules! dispatch {
    ($node:expr, $inner:ident => $body:expr) => {
        match $node {
            Node::Root($inner) => $body,
            Node::Paragraph($inner) => $body,
            Node::Text($inner) => $body,
            Node::Video($inner) => $body,
        }
    };
}

impl DocumentNode for Node {
    fn key(&self) -> &NodeKey {
        dispatch!(self, n => n.key())
    }

    fn node_type(&self) -> NodeType {
        dispatch!(self, n => n.node_type())
    }

    fn text_content(&self) -> String {
        dispatch!(self, n => n.text_content())
    }

    fn export_json(&self) -> SerializedNode {
        dispatch!(self, n => n.export_json())
    }

    fn export_dom(&self) -> DomNode {
        dispatch!(self, n => n.export_dom())
    }

    fn import_dom() -> DomConversionMap {
        let mut map = DomConversionMap::new();
        for node_type in NodeType::BUILTIN.into_iter().chain([NodeType::Video]) {
            map.merge(node_type.import_dom());
        }
        map
    }

    fn update_dom(&self, previous: &Self) -> bool {
        match (self, previous) {
            (Node::Root(a), Node::Root(b)) => a.update_dom(b),
            (Node::Paragraph(a), Node::Paragraph(b)) => a.update_dom(b),
            (Node::Text(a), Node::Text(b)) => a.update_dom(b),
            (Node::Video(a), Node::Video(b)) => a.update_dom(b),
            _ => false,
        }
    }

    fn is_inline(&self) -> bool {
        dispatch!(self, n => n.is_inline())
    }

    fn can_have_children(&self) -> bool {
        dispatch!(self, n => n.can_have_children())
    }

    fn decorate(&self, theme: &Theme) -> Option<Decoration> {
        dispatch!(self, n => n.decorate(theme))
    }
}

impl From<VideoNode> for Node {
    fn from(node: VideoNode) -> Self {
        Node::Video(node)
    }
}

impl From<ParagraphNode> for Node {
    fn from(node: ParagraphNode) -> Self {
        Node::Paragraph(node)
    }
}

impl From<TextNode> for Node {
    fn from(node: TextNode) -> Self {
        Node::Text(node)
    }
}
