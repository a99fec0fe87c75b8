//! cubecard CLI
//!
//! Lays out every card of a catalog into a JSON display list:
//! - `cubecard init`: scaffold a card project
//! - `cubecard render`: write `NN-<slug>.json` per card plus `manifest.json`
//! - `cubecard check`: validate a catalog and list its cards

mod commands;
mod config;
mod project;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Card artwork layout with inline glyph icons
#[derive(Parser, Debug)]
#[command(name = "cubecard")]
#[command(about = "Lay out card sets into print-ready display lists")]
#[command(version)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new card project
    Init {
        /// Project directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Project name (defaults to the directory name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Render every card to a display list
    Render(commands::RenderArgs),

    /// Validate a catalog and list its cards
    Check(commands::CheckArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .init();

    match cli.command {
        Command::Init { path, name } => {
            let name = name.unwrap_or_else(|| project_name(&path));
            project::create_project(&path, &name)?;
            tracing::info!("Created card project '{}' in {}", name, path.display());
            Ok(())
        }
        Command::Render(args) => commands::render(&args),
        Command::Check(args) => commands::check(&args),
    }
}

fn project_name(path: &std::path::Path) -> String {
    path.canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "cards".to_string())
}
