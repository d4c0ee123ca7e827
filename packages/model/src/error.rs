use crate::key::NodeKey;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeKey),

    #[error("Node {key} is not a {expected} node")]
    TypeMismatch { key: NodeKey, expected: &'static str },

    #[error("Node {0} does not support block formatting")]
    NotFormattable(NodeKey),

    #[error("Offset {offset} is out of range for node {key}")]
    OffsetOutOfRange { key: NodeKey, offset: usize },
}
