pub mod export_html;
pub mod import_html;
pub mod init;
pub mod insert_video;

pub use export_html::{export_html, ExportHtmlArgs};
pub use import_html::{import_html, ImportHtmlArgs};
pub use init::{init, InitArgs};
pub use insert_video::{insert_video, InsertVideoArgs};

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use vellum_editor::{Editor, EditorConfig};

/// Build an editor from `--config`, or from `vellum.config.json` in `cwd`
pub(crate) fn load_editor(config: Option<&Path>, cwd: &str) -> Result<Editor> {
    let config = match config {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EditorConfig::load_from_dir(Path::new(cwd))?,
    };
    Ok(Editor::new(config))
}

pub(crate) fn read_input(path: &Path, cwd: &str) -> Result<String> {
    let path = resolve(path, cwd);
    fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Print to stdout, or write to `output` when given
pub(crate) fn write_output(content: &str, output: Option<&Path>, cwd: &str) -> Result<()> {
    match output {
        Some(path) => {
            let path = resolve(path, cwd);
            fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("  {} Wrote {}", "✓".green(), path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn resolve(path: &Path, cwd: &str) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        PathBuf::from(cwd).join(path)
    }
}
