//! cubecard project file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "cubecard.toml";

/// Top-level project configuration (cubecard.toml)
#[derive(Debug, Deserialize, Serialize)]
pub struct CubecardConfig {
    pub project: ProjectConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Project metadata
#[derive(Debug, Deserialize, Serialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Inputs and outputs, relative to the project directory
#[derive(Debug, Deserialize, Serialize)]
pub struct PathsConfig {
    #[serde(default = "default_catalog")]
    pub catalog: PathBuf,
    /// Style file; built-in style if absent
    #[serde(default)]
    pub style: Option<PathBuf>,
    #[serde(default = "default_icons")]
    pub icons: PathBuf,
    /// Extra font directory searched before system fonts
    #[serde(default)]
    pub fonts: Option<PathBuf>,
    #[serde(default = "default_out")]
    pub out: PathBuf,
}

fn default_catalog() -> PathBuf {
    PathBuf::from("cards.toml")
}

fn default_icons() -> PathBuf {
    PathBuf::from("icons")
}

fn default_out() -> PathBuf {
    PathBuf::from("out")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            style: None,
            icons: default_icons(),
            fonts: None,
            out: default_out(),
        }
    }
}

impl PathsConfig {
    /// Make every relative path relative to `root`
    pub fn resolve(&self, root: &Path) -> PathsConfig {
        PathsConfig {
            catalog: root.join(&self.catalog),
            style: self.style.as_ref().map(|p| root.join(p)),
            icons: root.join(&self.icons),
            fonts: self.fonts.as_ref().map(|p| root.join(p)),
            out: root.join(&self.out),
        }
    }
}

impl CubecardConfig {
    /// Load configuration from a directory (looks for cubecard.toml)
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = if path.is_file() {
            path.to_path_buf()
        } else {
            path.join(CONFIG_FILE)
        };

        if !config_path.exists() {
            anyhow::bail!(
                "No {} found in {}. Run `cubecard init` to create one.",
                CONFIG_FILE,
                path.display()
            );
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: CubecardConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(config)
    }

    /// Create a new configuration with the given project name
    pub fn new(name: &str) -> Self {
        Self {
            project: ProjectConfig {
                name: name.to_string(),
                description: None,
            },
            paths: PathsConfig {
                style: Some(PathBuf::from("style.toml")),
                ..PathsConfig::default()
            },
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}
