//! Card catalog (cards.toml)

use std::path::Path;

use cubecard_paint::Color;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{CardError, Result};

/// Canonical card colors and the print colors they map to
const DEFAULT_COLORS: &[(&str, &str)] = &[
    ("red", "red"),
    ("orange", "orange"),
    ("yellow", "yellow"),
    ("green", "green"),
    ("blue", "blue"),
    ("magenta", "magenta"),
    ("brown", "brown"),
    ("white", "white"),
];

/// Color of a card with no color set
const BLANK_COLOR: &str = "white";

/// Content of one card
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Card {
    #[serde(default = "default_name")]
    pub name: String,
    /// Canonical color name, `#rrggbb`, or empty for a blank card
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub cost: u32,
    /// Effect when the card is gained
    #[serde(default)]
    pub now: String,
    /// Effect while the card is active
    #[serde(default)]
    pub active: String,
    /// Effect when the card is run
    #[serde(default)]
    pub run: String,
}

fn default_name() -> String {
    "card".to_string()
}

impl Card {
    pub fn color_name(&self) -> &str {
        let name = self.color.trim();
        if name.is_empty() {
            BLANK_COLOR
        } else {
            name
        }
    }

    /// A card with no effect text
    pub fn is_blank(&self) -> bool {
        [&self.now, &self.active, &self.run]
            .iter()
            .all(|s| s.trim().is_empty())
    }

    /// Lowercase file-name-safe form of the card name
    pub fn slug(&self) -> String {
        let slug: String = self
            .name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '-'
                }
            })
            .collect();
        let slug = slug
            .split('-')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("-");
        if slug.is_empty() {
            default_name()
        } else {
            slug
        }
    }
}

/// A card and how many copies to print
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CardEntry {
    #[serde(flatten)]
    pub card: Card,
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    1
}

/// Canonical color name -> print color (name or hex)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ColorMap(FxHashMap<String, String>);

impl Default for ColorMap {
    fn default() -> Self {
        Self(
            DEFAULT_COLORS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl ColorMap {
    /// Override or add a mapping
    pub fn insert(&mut self, name: impl Into<String>, print: impl Into<String>) {
        self.0.insert(name.into(), print.into());
    }

    /// Resolve a canonical name through the map, falling back to parsing
    /// it directly (`"#ff8800"`, `"lavender"`)
    pub fn resolve(&self, name: &str) -> Result<Color> {
        let key = name.trim().to_ascii_lowercase();
        let print = self.0.get(&key).map(String::as_str).unwrap_or(name);
        Color::parse(print).map_err(|_| CardError::UnknownColor(name.to_string()))
    }
}

/// Every card in the set, loaded from `cards.toml`:
///
/// ```toml
/// [colors]
/// green = "#2e8b57"
///
/// [[card]]
/// name = "Switch Hitter"
/// color = "orange"
/// cost = 4
/// run = "lose one non-grey die, gain $f = half its cost"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CardCatalog {
    /// Overrides merged over the default color map
    #[serde(default)]
    pub colors: FxHashMap<String, String>,
    #[serde(default, rename = "card")]
    pub cards: Vec<CardEntry>,
}

impl CardCatalog {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let catalog: CardCatalog = toml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CardError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::debug!(
            "Loaded {} card entries ({} cards) from {}",
            catalog.cards.len(),
            catalog.total_cards(),
            path.display()
        );
        Ok(catalog)
    }

    /// Default color map with this catalog's overrides applied
    pub fn color_map(&self) -> ColorMap {
        let mut map = ColorMap::default();
        for (name, print) in &self.colors {
            map.insert(name.to_ascii_lowercase(), print.clone());
        }
        map
    }

    /// Every card color must resolve
    pub fn validate(&self) -> Result<()> {
        let colors = self.color_map();
        for entry in &self.cards {
            colors.resolve(entry.card.color_name())?;
        }
        Ok(())
    }

    /// Number of physical cards, copies included
    pub fn total_cards(&self) -> u64 {
        self.cards.iter().map(|e| u64::from(e.count)).sum()
    }

    /// Each card repeated `count` times, in catalog order
    pub fn expanded(&self) -> impl Iterator<Item = &Card> {
        self.cards
            .iter()
            .flat_map(|e| std::iter::repeat(&e.card).take(e.count as usize))
    }
}
