use serde::{Deserialize, Serialize};

/// Class names handed to the renderer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Classes for embedded block content such as videos
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed_block: Option<BlockTheme>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTheme {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
}
