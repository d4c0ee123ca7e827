mod decorator_block;
mod paragraph;
mod root;
mod text;
mod video;

pub use decorator_block::DecoratorBlock;
pub use paragraph::ParagraphNode;
pub use root::RootNode;
pub use text::TextNode;
pub use video::{
    create_video_node, is_video_node, VideoNode, DEFAULT_VIDEO_HEIGHT, DEFAULT_VIDEO_WIDTH,
    VIDEO_MARKER_ATTRIBUTE,
};
