use crate::conversion::DomConversionMap;
use crate::error::NodeError;
use crate::key::NodeKey;
use crate::node::{DocumentNode, NodeType};
use crate::serialized::{SerializedNode, SerializedTextNode};
use vellum_markup::DomNode;

/// A run of plain text inside a paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    key: NodeKey,
    text: String,
    format: u32,
    style: String,
}

impl TextNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            key: NodeKey::generate(),
            text: text.into(),
            format: 0,
            style: String::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters, the unit of selection offsets
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn import_json(record: &SerializedTextNode) -> Self {
        Self {
            key: NodeKey::generate(),
            text: record.text.clone(),
            format: record.format,
            style: record.style.clone(),
        }
    }

    /// Cut this node at `offset` characters and return the tail as a new
    /// node with the same formatting.
    pub fn split_off(&mut self, offset: usize) -> Result<TextNode, NodeError> {
        let byte = if offset == self.char_len() {
            self.text.len()
        } else {
            self.text
                .char_indices()
                .nth(offset)
                .map(|(index, _)| index)
                .ok_or_else(|| NodeError::OffsetOutOfRange {
                    key: self.key.clone(),
                    offset,
                })?
        };

        Ok(TextNode {
            key: NodeKey::generate(),
            text: self.text.split_off(byte),
            format: self.format,
            style: self.style.clone(),
        })
    }
}

impl DocumentNode for TextNode {
    fn key(&self) -> &NodeKey {
        &self.key
    }

    fn node_type(&self) -> NodeType {
        NodeType::Text
    }

    fn text_content(&self) -> String {
        self.text.clone()
    }

    fn export_json(&self) -> SerializedNode {
        SerializedNode::Text(SerializedTextNode {
            text: self.text.clone(),
            format: self.format,
            style: self.style.clone(),
            version: 1,
        })
    }

    fn export_dom(&self) -> DomNode {
        DomNode::text(self.text.clone())
    }

    // Markup text nodes are converted by the importer directly
    fn import_dom() -> DomConversionMap {
        DomConversionMap::new()
    }

    fn update_dom(&self, previous: &Self) -> bool {
        self.format == previous.format && self.style == previous.style
    }

    fn is_inline(&self) -> bool {
        true
    }
}
