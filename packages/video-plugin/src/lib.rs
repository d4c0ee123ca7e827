//! # Vellum Video
//!
//! Wires [`VideoNode`](vellum_model::VideoNode) into an editor.
//!
//! ```rust
//! use vellum_editor::{Editor, EditorConfig};
//! use vellum_model::NodeType;
//! use vellum_video::{InsertVideoPayload, VideoPlugin, INSERT_VIDEO_COMMAND};
//!
//! let mut editor = Editor::new(EditorConfig::default().with_nodes([NodeType::Video]));
//! let registration = VideoPlugin::register(&mut editor).unwrap();
//!
//! let handled = editor
//!     .dispatch_command(&INSERT_VIDEO_COMMAND, InsertVideoPayload::new("https://x/y.mp4"))
//!     .unwrap();
//! assert!(handled);
//!
//! registration.revoke();
//! ```

mod command;
mod plugin;

pub use command::{InsertVideoPayload, INSERT_VIDEO_COMMAND};
pub use plugin::{insert_video, VideoPlugin};
