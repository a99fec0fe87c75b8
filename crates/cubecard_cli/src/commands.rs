//! `render` and `check` subcommands

use anyhow::{Context, Result};
use clap::Args;
use cubecard_cards::{CardCatalog, CardRenderer, CardStyle, GlyphTable};
use cubecard_image::{DirectoryLoader, IconCache};
use cubecard_text::FontBook;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{CubecardConfig, PathsConfig, CONFIG_FILE};

/// Where to find the project; explicit paths override cubecard.toml
#[derive(Args, Debug)]
pub struct ProjectArgs {
    /// Project directory
    #[arg(short, long, default_value = ".")]
    project: PathBuf,

    /// Card catalog (cards.toml)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Card style (style.toml)
    #[arg(long)]
    style: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Icon directory
    #[arg(long)]
    icons: Option<PathBuf>,

    /// Extra font directory
    #[arg(long)]
    fonts: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    project: ProjectArgs,
}

impl ProjectArgs {
    fn paths(&self) -> Result<PathsConfig> {
        let mut paths = if self.project.join(CONFIG_FILE).exists() {
            CubecardConfig::load_from_dir(&self.project)?
                .paths
                .resolve(&self.project)
        } else {
            PathsConfig::default().resolve(&self.project)
        };
        if let Some(catalog) = &self.catalog {
            paths.catalog = catalog.clone();
        }
        if let Some(style) = &self.style {
            paths.style = Some(style.clone());
        }
        Ok(paths)
    }
}

fn load_catalog(path: &Path) -> Result<CardCatalog> {
    CardCatalog::load(path).with_context(|| format!("Failed to load catalog {}", path.display()))
}

fn load_style(path: Option<&Path>) -> Result<CardStyle> {
    match path {
        Some(path) => CardStyle::load(path)
            .with_context(|| format!("Failed to load style {}", path.display())),
        None => Ok(CardStyle::default()),
    }
}

#[derive(Debug, Serialize)]
struct Manifest {
    cards: Vec<ManifestEntry>,
    failed: Vec<FailedCard>,
}

#[derive(Debug, Serialize)]
struct ManifestEntry {
    file: String,
    name: String,
    color: String,
    cost: u32,
}

#[derive(Debug, Serialize)]
struct FailedCard {
    index: usize,
    name: String,
    error: String,
}

pub fn render(args: &RenderArgs) -> Result<()> {
    let mut paths = args.project.paths()?;
    if let Some(icons) = &args.icons {
        paths.icons = icons.clone();
    }
    if let Some(fonts) = &args.fonts {
        paths.fonts = Some(fonts.clone());
    }
    if let Some(out) = &args.out {
        paths.out = out.clone();
    }

    let catalog = load_catalog(&paths.catalog)?;
    let style = load_style(paths.style.as_deref())?;

    let mut fonts = FontBook::with_system_fonts();
    if let Some(dir) = &paths.fonts {
        fonts.load_fonts_dir(dir);
    }
    if !paths.icons.is_dir() {
        tracing::warn!("Icon directory {} does not exist", paths.icons.display());
    }
    let icons = IconCache::new(DirectoryLoader::new(&paths.icons));

    let renderer = CardRenderer::new(style, catalog.color_map(), &fonts, &icons)
        .context("Invalid card style")?;

    fs::create_dir_all(&paths.out)
        .with_context(|| format!("Failed to create {}", paths.out.display()))?;

    let mut manifest = Manifest {
        cards: Vec::new(),
        failed: Vec::new(),
    };
    for rendered in renderer.render_catalog(&catalog) {
        let file = rendered.file_name();
        match &rendered.display {
            Ok(display) => {
                let json = serde_json::to_string_pretty(display)?;
                let path = paths.out.join(&file);
                fs::write(&path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                tracing::debug!("Wrote {}", path.display());
                manifest.cards.push(ManifestEntry {
                    file,
                    name: rendered.card.name.clone(),
                    color: rendered.card.color_name().to_string(),
                    cost: rendered.card.cost,
                });
            }
            Err(err) => {
                tracing::error!(
                    "Card {} '{}' failed: {}",
                    rendered.index,
                    rendered.card.name,
                    err
                );
                manifest.failed.push(FailedCard {
                    index: rendered.index,
                    name: rendered.card.name.clone(),
                    error: err.to_string(),
                });
            }
        }
    }

    let manifest_path = paths.out.join("manifest.json");
    fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)
        .with_context(|| format!("Failed to write {}", manifest_path.display()))?;

    tracing::info!(
        "Rendered {} cards to {} ({} icon renditions)",
        manifest.cards.len(),
        paths.out.display(),
        icons.len()
    );
    if !manifest.failed.is_empty() {
        anyhow::bail!(
            "{} of {} cards failed",
            manifest.failed.len(),
            manifest.failed.len() + manifest.cards.len()
        );
    }
    Ok(())
}

pub fn check(args: &CheckArgs) -> Result<()> {
    let paths = args.project.paths()?;
    let catalog = load_catalog(&paths.catalog)?;
    let style = load_style(paths.style.as_deref())?;
    let glyphs = GlyphTable::from_config(&style.glyphs, &catalog.color_map())
        .context("Invalid glyph table")?;

    let mut unknown = 0;
    for entry in &catalog.cards {
        let card = &entry.card;
        println!(
            "{:>3} x {:<8} {:>2}  {}",
            entry.count,
            card.color_name(),
            card.cost,
            card.name
        );
        for text in [&card.now, &card.active, &card.run] {
            for token in unknown_tokens(text, style.glyphs.prefix, &glyphs) {
                tracing::warn!("'{}': unknown glyph token {:?}", card.name, token);
                unknown += 1;
            }
        }
    }
    println!("{} entries, {} cards", catalog.cards.len(), catalog.total_cards());

    if unknown > 0 {
        anyhow::bail!("{} unknown glyph tokens", unknown);
    }
    Ok(())
}

/// Prefixed tokens with no icon in the glyph table.
///
/// A prefix before whitespace or a number (`pay $ now`, `costs $5`,
/// `$.50`) is plain text, not a token.
fn unknown_tokens(text: &str, prefix: char, glyphs: &GlyphTable) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut unknown = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != prefix {
            i += 1;
            continue;
        }
        let Some(&symbol) = chars.get(i + 1) else {
            break;
        };
        let token = format!("{prefix}{symbol}");
        let before_number = chars.get(i + 2).is_some_and(|c| c.is_ascii_digit());
        let looks_like_token =
            symbol.is_ascii_graphic() && !symbol.is_ascii_digit() && !before_number;
        if glyphs.lookup(&token).is_none() && looks_like_token {
            unknown.push(token);
        }
        i += 2;
    }
    unknown
}
