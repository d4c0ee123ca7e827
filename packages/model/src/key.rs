use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

const ROOT_KEY: &str = "root";

/// Opaque node identifier.
///
/// Keys are handed out by [`NodeKey::generate`] when a node is constructed
/// without one. They identify a node within one editor and are not part of
/// the serialized form, so a deserialized node always gets a fresh key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeKey(String);

impl NodeKey {
    pub fn generate() -> Self {
        NodeKey(NEXT_KEY.fetch_add(1, Ordering::Relaxed).to_string())
    }

    pub fn root() -> Self {
        NodeKey(ROOT_KEY.to_string())
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT_KEY
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeKey {
    fn from(key: &str) -> Self {
        NodeKey(key.to_string())
    }
}

impl From<String> for NodeKey {
    fn from(key: String) -> Self {
        NodeKey(key)
    }
}
