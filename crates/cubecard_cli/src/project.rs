//! Project creation and scaffolding

use anyhow::{Context, Result};
use cubecard_cards::CardStyle;
use std::fs;
use std::path::Path;

use crate::config::{CubecardConfig, CONFIG_FILE};

/// Create a new card project
pub fn create_project(path: &Path, name: &str) -> Result<()> {
    if path.join(CONFIG_FILE).exists() {
        anyhow::bail!("{} already contains a {}", path.display(), CONFIG_FILE);
    }

    let config = CubecardConfig::new(name);
    fs::create_dir_all(path.join(&config.paths.icons))?;

    fs::write(path.join(CONFIG_FILE), config.to_toml()?)?;

    let style = toml::to_string_pretty(&CardStyle::default())
        .context("Failed to serialize the default style")?;
    fs::write(path.join("style.toml"), style)?;

    fs::write(path.join(&config.paths.catalog), template_catalog())?;

    fs::write(
        path.join(".gitignore"),
        r#"# cubecard output
/out/
"#,
    )?;

    Ok(())
}

fn template_catalog() -> &'static str {
    r##"# Card colors map to print colors; override any of them here
[colors]
# green = "#2e8b57"

# Effects may use glyph tokens: $f foot, $c coin, $d die, $g grey die, $= arrow

[[card]]
name = "Switch Hitter"
color = "orange"
cost = 4
run = "lose one non-grey die (not optional), gain $f = half the cost of that die"

[[card]]
name = "Walker"
color = "green"
cost = 2
active = "gain 1 $f per die"
count = 3

[[card]]
name = "Blank"
"##
}
