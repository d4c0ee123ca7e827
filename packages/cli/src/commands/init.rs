use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use vellum_editor::{Editor, EditorConfig, DEFAULT_CONFIG_NAME};
use vellum_model::{BlockTheme, NodeType, Theme};

const DOCUMENT_NAME: &str = "document.json";

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Editor namespace written to the config
    #[arg(short, long, default_value = "vellum")]
    pub namespace: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Vellum project...".bright_blue().bold());

    let config = EditorConfig::new(args.namespace)
        .with_nodes([NodeType::Video])
        .with_theme(Theme {
            embed_block: Some(BlockTheme {
                base: Some("embed-block".to_string()),
                focus: Some("embed-block--focus".to_string()),
            }),
        });

    // Write config file
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    // Create an empty document if there is none
    let document_path = PathBuf::from(cwd).join(DOCUMENT_NAME);
    if !document_path.exists() {
        let editor = Editor::new(config);
        fs::write(&document_path, editor.editor_state_json()?)?;
        println!("  {} Created {}", "✓".green(), DOCUMENT_NAME);
    }

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: vellum insert-video {} --url <url> -o {}", DOCUMENT_NAME, DOCUMENT_NAME);
    println!("  2. Run: vellum export-html {}", DOCUMENT_NAME);

    Ok(())
}
