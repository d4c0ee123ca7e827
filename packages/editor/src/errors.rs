//! Error types for the editor

use thiserror::Error;
use vellum_model::{NodeError, NodeKey, NodeType};

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("{owner}: {node_type} node not registered on editor")]
    NodeNotRegistered {
        owner: &'static str,
        node_type: NodeType,
    },

    #[error("Node error: {0}")]
    Node(#[from] NodeError),

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    #[error("Node already exists: {0}")]
    DuplicateKey(NodeKey),

    #[error("Markup error: {0}")]
    Markup(#[from] vellum_markup::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EditorError {
    pub(crate) fn structure(message: impl Into<String>) -> Self {
        EditorError::InvalidStructure(message.into())
    }
}
