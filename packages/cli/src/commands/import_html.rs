use super::{load_editor, read_input, write_output};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Args)]
pub struct ImportHtmlArgs {
    /// HTML file to import
    pub input: PathBuf,

    /// Config file (defaults to vellum.config.json in the current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the state JSON here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn import_html(args: ImportHtmlArgs, cwd: &str) -> Result<()> {
    let mut editor = load_editor(args.config.as_deref(), cwd)?;
    let markup = read_input(&args.input, cwd)?;

    let blocks = editor.import_html(&markup)?;
    info!(blocks = blocks.len(), "imported markup");
    write_output(&editor.editor_state_json()?, args.output.as_deref(), cwd)
}
