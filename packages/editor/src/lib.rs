//! # Vellum Editor
//!
//! Document engine hosting Vellum nodes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ markup: HTML text ↔ DOM                     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ model: node types + conversion contracts    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: state, updates and commands         │
//! │  - Copy-on-write node arena                 │
//! │  - Transactional updates with rollback      │
//! │  - Prioritized command dispatch             │
//! │  - Decorations for decorator nodes          │
//! │  - JSON and HTML import/export              │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Committed states are immutable**: updates write to private copies
//! 2. **Structure lives in the editor**: nodes never own their children
//! 3. **Registration gates everything**: unregistered node types cannot enter
//!    a document from code, JSON or HTML
//!
//! ## Usage
//!
//! ```rust
//! use vellum_editor::{Editor, EditorConfig};
//! use vellum_model::{NodeType, VideoNode};
//!
//! let mut editor = Editor::new(EditorConfig::default().with_nodes([NodeType::Video]));
//!
//! editor
//!     .update(|update| {
//!         let video = VideoNode::new("https://example.com/clip.mp4", None, None, None, None);
//!         update.insert_node_to_nearest_root(video)
//!     })
//!     .unwrap();
//!
//! assert_eq!(editor.state().nodes_of_type(NodeType::Video).len(), 1);
//! assert_eq!(editor.decorations().len(), 1);
//! ```

pub mod commands;
pub mod config;
pub mod editor;
pub mod errors;
pub mod html;
pub mod state;
pub mod update;

pub use commands::{Command, CommandPriority, Registration};
pub use config::{EditorConfig, DEFAULT_CONFIG_NAME};
pub use editor::Editor;
pub use errors::EditorError;
pub use state::{EditorState, Point, SerializedEditorState, Selection};
pub use update::Update;
