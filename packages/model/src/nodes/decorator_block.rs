use crate::format::ElementFormat;
use crate::key::NodeKey;

/// Fields shared by block-level decorator nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoratorBlock {
    pub(crate) key: NodeKey,
    pub(crate) format: ElementFormat,
}

impl DecoratorBlock {
    /// A missing key is allocated from the editor's key space
    pub fn new(format: Option<ElementFormat>, key: Option<NodeKey>) -> Self {
        Self {
            key: key.unwrap_or_else(NodeKey::generate),
            format: format.unwrap_or_default(),
        }
    }

    pub fn key(&self) -> &NodeKey {
        &self.key
    }

    pub fn format(&self) -> ElementFormat {
        self.format
    }
}
