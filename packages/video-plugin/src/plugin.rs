use crate::command::{InsertVideoPayload, INSERT_VIDEO_COMMAND};
use tracing::{debug, info};
use vellum_editor::{CommandPriority, Editor, EditorError, Registration, Update};
use vellum_model::{create_video_node, NodeType};

const PLUGIN_NAME: &str = "VideoPlugin";

fn not_registered() -> EditorError {
    EditorError::NodeNotRegistered {
        owner: PLUGIN_NAME,
        node_type: NodeType::Video,
    }
}

/// Handles [`INSERT_VIDEO_COMMAND`] for an editor
pub struct VideoPlugin;

impl VideoPlugin {
    /// Register the insert handler at editor priority.
    ///
    /// Fails right away when the editor was built without the `Video` node
    /// type; no handler is installed in that case.
    pub fn register(editor: &mut Editor) -> Result<Registration, EditorError> {
        if !editor.has_nodes(&[NodeType::Video]) {
            return Err(not_registered());
        }

        let registration = editor.register_command(
            &INSERT_VIDEO_COMMAND,
            CommandPriority::Editor,
            handle_insert_video,
        );
        info!(namespace = %editor.config().namespace, "video plugin registered");
        Ok(registration)
    }
}

fn handle_insert_video(payload: &InsertVideoPayload, update: &mut Update<'_>) -> Result<bool, EditorError> {
    if !update.is_registered(NodeType::Video) {
        return Err(not_registered());
    }

    let video = create_video_node(payload.url.clone(), payload.width, payload.height);
    let key = update.insert_node_to_nearest_root(video)?;
    debug!(node = %key, url = %payload.url, "video inserted");
    Ok(true)
}

/// Dispatch [`INSERT_VIDEO_COMMAND`], failing before anything is built when
/// the editor does not know the `Video` node type
pub fn insert_video(editor: &mut Editor, payload: InsertVideoPayload) -> Result<bool, EditorError> {
    if !editor.has_nodes(&[NodeType::Video]) {
        return Err(not_registered());
    }
    editor.dispatch_command(&INSERT_VIDEO_COMMAND, payload)
}
