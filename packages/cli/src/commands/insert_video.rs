use super::{load_editor, read_input, write_output};
use anyhow::{bail, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;
use vellum_editor::Editor;
use vellum_video::{InsertVideoPayload, VideoPlugin, INSERT_VIDEO_COMMAND};

#[derive(Debug, Args)]
pub struct InsertVideoArgs {
    /// Editor state JSON file
    pub state: PathBuf,

    /// Video source URL
    #[arg(short, long)]
    pub url: String,

    /// Player width in pixels (default 560)
    #[arg(long)]
    pub width: Option<u32>,

    /// Player height in pixels (default 315)
    #[arg(long)]
    pub height: Option<u32>,

    /// Config file (defaults to vellum.config.json in the current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the new state here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn insert_video(args: InsertVideoArgs, cwd: &str) -> Result<()> {
    let mut editor = load_editor(args.config.as_deref(), cwd)?;
    let state = read_input(&args.state, cwd)?;

    let payload = InsertVideoPayload {
        url: args.url,
        width: args.width,
        height: args.height,
    };
    let json = insert_into_state(&mut editor, &state, payload)?;
    write_output(&json, args.output.as_deref(), cwd)
}

pub(crate) fn insert_into_state(editor: &mut Editor, state: &str, payload: InsertVideoPayload) -> Result<String> {
    let registration = VideoPlugin::register(editor)?;
    editor.set_editor_state_json(state)?;

    let url = payload.url.clone();
    let handled = editor.dispatch_command(&INSERT_VIDEO_COMMAND, payload)?;
    registration.revoke();

    if !handled {
        bail!("No handler accepted the video insert");
    }
    info!(url = %url, "video inserted");
    Ok(editor.editor_state_json()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_editor::EditorConfig;
    use vellum_model::NodeType;

    const EMPTY_STATE: &str = r#"{"root":{"type":"root","version":1,"children":[]}}"#;

    #[test]
    fn test_insert_into_empty_state() {
        let mut editor = Editor::new(EditorConfig::default().with_nodes([NodeType::Video]));
        let json = insert_into_state(&mut editor, EMPTY_STATE, InsertVideoPayload::new("https://x/y.mp4")).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let video = &value["root"]["children"][0];
        assert_eq!(video["type"], "Video");
        assert_eq!(video["videoSrc"], "https://x/y.mp4");
        assert_eq!(video["width"], 560);
        assert_eq!(video["height"], 315);
    }

    #[test]
    fn test_insert_needs_video_in_config() {
        let mut editor = Editor::new(EditorConfig::default());
        let err = insert_into_state(&mut editor, EMPTY_STATE, InsertVideoPayload::new("a.mp4")).unwrap_err();
        assert!(err.to_string().contains("not registered"));
    }
}
