//! Persisted JSON records.
//!
//! Every record carries `type` and `version`. Element records (root,
//! paragraph) nest their children; leaf records do not.

use crate::format::ElementFormat;
use serde::{Deserialize, Serialize};

fn default_version() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SerializedNode {
    #[serde(rename = "root")]
    Root(SerializedRootNode),

    #[serde(rename = "paragraph")]
    Paragraph(SerializedParagraphNode),

    #[serde(rename = "text")]
    Text(SerializedTextNode),

    #[serde(rename = "Video")]
    Video(SerializedVideoNode),
}

impl SerializedNode {
    pub fn type_name(&self) -> &'static str {
        match self {
            SerializedNode::Root(_) => "root",
            SerializedNode::Paragraph(_) => "paragraph",
            SerializedNode::Text(_) => "text",
            SerializedNode::Video(_) => "Video",
        }
    }

    /// Nested child records, empty for leaves
    pub fn children(&self) -> &[SerializedNode] {
        match self {
            SerializedNode::Root(root) => &root.children,
            SerializedNode::Paragraph(paragraph) => &paragraph.children,
            SerializedNode::Text(_) | SerializedNode::Video(_) => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<SerializedNode>> {
        match self {
            SerializedNode::Root(root) => Some(&mut root.children),
            SerializedNode::Paragraph(paragraph) => Some(&mut paragraph.children),
            SerializedNode::Text(_) | SerializedNode::Video(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedRootNode {
    #[serde(default)]
    pub children: Vec<SerializedNode>,

    #[serde(default)]
    pub direction: Option<String>,

    #[serde(default)]
    pub format: ElementFormat,

    #[serde(default)]
    pub indent: u32,

    #[serde(default = "default_version")]
    pub version: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedParagraphNode {
    #[serde(default)]
    pub children: Vec<SerializedNode>,

    #[serde(default)]
    pub direction: Option<String>,

    #[serde(default)]
    pub format: ElementFormat,

    #[serde(default)]
    pub indent: u32,

    #[serde(default = "default_version")]
    pub version: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedTextNode {
    pub text: String,

    /// Bit set of inline formats (bold, italic, ...)
    #[serde(default)]
    pub format: u32,

    #[serde(default)]
    pub style: String,

    #[serde(default = "default_version")]
    pub version: u32,
}

/// `{ type: "Video", version: 1, videoSrc, width, height, format }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedVideoNode {
    #[serde(default)]
    pub format: ElementFormat,

    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(rename = "videoSrc")]
    pub video_src: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}
