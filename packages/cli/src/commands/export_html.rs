use super::{load_editor, read_input, write_output};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportHtmlArgs {
    /// Editor state JSON file
    pub state: PathBuf,

    /// Config file (defaults to vellum.config.json in the current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the HTML here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn export_html(args: ExportHtmlArgs, cwd: &str) -> Result<()> {
    let mut editor = load_editor(args.config.as_deref(), cwd)?;
    let state = read_input(&args.state, cwd)?;

    editor.set_editor_state_json(&state)?;
    write_output(&editor.generate_html(), args.output.as_deref(), cwd)
}
