use serde::{Deserialize, Serialize};
use vellum_editor::{create_command, Command};

/// Insert a video at the nearest valid root position
pub const INSERT_VIDEO_COMMAND: Command<InsertVideoPayload> = create_command!("INSERT_VIDEO_COMMAND");

/// `{ url, width?, height? }`. Missing dimensions fall back to the video
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertVideoPayload {
    pub url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl InsertVideoPayload {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            width: None,
            height: None,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}
