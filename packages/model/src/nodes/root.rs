use crate::conversion::DomConversionMap;
use crate::node::{DocumentNode, NodeType};
use crate::serialized::{SerializedNode, SerializedRootNode};
use crate::key::NodeKey;
use vellum_markup::{DomElement, DomNode};

/// The single top-level node of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootNode {
    key: NodeKey,
}

impl RootNode {
    pub fn new() -> Self {
        Self { key: NodeKey::root() }
    }
}

impl Default for RootNode {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentNode for RootNode {
    fn key(&self) -> &NodeKey {
        &self.key
    }

    fn node_type(&self) -> NodeType {
        NodeType::Root
    }

    fn text_content(&self) -> String {
        String::new()
    }

    fn export_json(&self) -> SerializedNode {
        SerializedNode::Root(SerializedRootNode {
            children: Vec::new(),
            direction: None,
            format: Default::default(),
            indent: 0,
            version: 1,
        })
    }

    fn export_dom(&self) -> DomNode {
        DomNode::Element(DomElement::new("div"))
    }

    fn import_dom() -> DomConversionMap {
        DomConversionMap::new()
    }

    fn update_dom(&self, _previous: &Self) -> bool {
        true
    }

    fn can_have_children(&self) -> bool {
        true
    }
}
