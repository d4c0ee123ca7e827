mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    export_html, import_html, init, insert_video, ExportHtmlArgs, ImportHtmlArgs, InitArgs,
    InsertVideoArgs,
};
use tracing_subscriber::EnvFilter;

/// Vellum CLI - Edit rich-text documents with embedded video
#[derive(Parser, Debug)]
#[command(name = "vellum")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a vellum.config.json and an empty document
    Init(InitArgs),

    /// Insert a video into an editor state and print the new state
    InsertVideo(InsertVideoArgs),

    /// Print the HTML for an editor state
    ExportHtml(ExportHtmlArgs),

    /// Convert an HTML file into an editor state
    ImportHtml(ImportHtmlArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::InsertVideo(args) => insert_video(args, &cwd),
        Command::ExportHtml(args) => export_html(args, &cwd),
        Command::ImportHtml(args) => import_html(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
