//! # Vellum Model
//!
//! Node types of a Vellum document and the contracts through which the
//! editor moves them in and out of JSON and HTML.
//!
//! ## Node kinds
//!
//! ```text
//! root
//!  ├── paragraph ── text, text, ...
//!  ├── Video            (decorator block, leaf)
//!  └── paragraph ── text
//! ```
//!
//! Every variant of [`Node`] implements [`DocumentNode`]. Nodes never hold
//! their children; the editor owns the tree structure and stores nodes in an
//! arena keyed by [`NodeKey`].
//!
//! ## Mutation
//!
//! Nodes that already live in a document are changed only through a
//! [`NodeStore`], whose `get_writable` hands out a private copy of the node
//! for the current update. Setters such as
//! [`VideoNode::set_width_and_height`] take the store rather than `&mut self`.

pub mod conversion;
pub mod decoration;
pub mod error;
pub mod format;
pub mod key;
pub mod node;
pub mod nodes;
pub mod serialized;
pub mod theme;

pub use conversion::{DomConversion, DomConversionFn, DomConversionMap, DomConversionOutput, DomMatcher};
pub use decoration::{BlockClassName, Decoration, VideoComponentProps};
pub use error::NodeError;
pub use format::ElementFormat;
pub use key::NodeKey;
pub use node::{DocumentNode, Node, NodeStore, NodeType};
pub use nodes::{
    create_video_node, is_video_node, DecoratorBlock, ParagraphNode, RootNode, TextNode,
    VideoNode, DEFAULT_VIDEO_HEIGHT, DEFAULT_VIDEO_WIDTH, VIDEO_MARKER_ATTRIBUTE,
};
pub use serialized::{
    SerializedNode, SerializedParagraphNode, SerializedRootNode, SerializedTextNode,
    SerializedVideoNode,
};
pub use theme::{BlockTheme, Theme};
