//! Render descriptions produced by decorator nodes.
//!
//! A decoration is plain data. The renderer that turns it into pixels or
//! widgets lives outside this crate.

use crate::format::ElementFormat;
use crate::key::NodeKey;
use crate::theme::Theme;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "component")]
pub enum Decoration {
    Video(VideoComponentProps),
}

impl Decoration {
    pub fn node_key(&self) -> &NodeKey {
        match self {
            Decoration::Video(props) => &props.node_key,
        }
    }
}

/// Classes for an alignable block wrapper
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BlockClassName {
    pub base: String,
    pub focus: String,
}

impl BlockClassName {
    /// Resolve the embed block classes, empty when the theme has none
    pub fn embed_block(theme: &Theme) -> Self {
        let block = theme.embed_block.as_ref();
        Self {
            base: block.and_then(|b| b.base.clone()).unwrap_or_default(),
            focus: block.and_then(|b| b.focus.clone()).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoComponentProps {
    pub class_name: BlockClassName,
    pub format: ElementFormat,
    pub node_key: NodeKey,
    pub video_src: String,
    pub width: u32,
    pub height: u32,
    /// Playback controls are always shown
    pub controls: bool,
}
