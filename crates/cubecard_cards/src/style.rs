//! Card style configuration (style.toml)

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CardError, Result};

/// Geometry, fonts and colors shared by every card face.
///
/// Defaults describe a 2.5" x 3.5" card at 300 dpi.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CardStyle {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
    /// Margin between the colored band and the content
    #[serde(default = "default_edge")]
    pub edge: f32,
    /// Thickness of the colored band around the card
    #[serde(default = "default_border")]
    pub border: f32,
    #[serde(default = "default_corner")]
    pub corner: f32,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_text_color")]
    pub text_color: String,
    #[serde(default = "default_title_font")]
    pub title_font: String,
    #[serde(default = "default_label_font")]
    pub label_font: String,
    #[serde(default = "default_text_font")]
    pub text_font: String,
    #[serde(default = "default_cost_font")]
    pub cost_font: String,
    /// Radius of the cost badge
    #[serde(default = "default_cost_radius")]
    pub cost_radius: f32,
    /// Vertical space between sections
    #[serde(default = "default_gap")]
    pub gap: f32,
    #[serde(default)]
    pub glyphs: GlyphConfig,
}

fn default_width() -> f32 {
    750.0
}

fn default_height() -> f32 {
    1050.0
}

fn default_edge() -> f32 {
    30.0
}

fn default_border() -> f32 {
    24.0
}

fn default_corner() -> f32 {
    36.0
}

fn default_background() -> String {
    "lavender".to_string()
}

fn default_text_color() -> String {
    "black".to_string()
}

fn default_title_font() -> String {
    "bold 60px sans-serif".to_string()
}

fn default_label_font() -> String {
    "bold 36px sans-serif".to_string()
}

fn default_text_font() -> String {
    "36px sans-serif".to_string()
}

fn default_cost_font() -> String {
    "bold 48px sans-serif".to_string()
}

fn default_cost_radius() -> f32 {
    44.0
}

fn default_gap() -> f32 {
    24.0
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            edge: default_edge(),
            border: default_border(),
            corner: default_corner(),
            background: default_background(),
            text_color: default_text_color(),
            title_font: default_title_font(),
            label_font: default_label_font(),
            text_font: default_text_font(),
            cost_font: default_cost_font(),
            cost_radius: default_cost_radius(),
            gap: default_gap(),
            glyphs: GlyphConfig::default(),
        }
    }
}

impl CardStyle {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CardError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Left edge of the content area
    pub fn content_left(&self) -> f32 {
        self.border + self.edge
    }

    /// Width available to text
    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.content_left()
    }
}

/// Inline glyph tokens: `prefix` followed by one of the icon symbols
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GlyphConfig {
    #[serde(default = "default_prefix")]
    pub prefix: char,
    #[serde(default = "default_icons", rename = "icon")]
    pub icons: Vec<GlyphIcon>,
}

fn default_prefix() -> char {
    '$'
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            icons: default_icons(),
        }
    }
}

/// One symbol of the glyph table and how its icon sits in the line
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GlyphIcon {
    pub symbol: char,
    /// Icon name handed to the icon loader
    pub icon: String,
    /// Nudge from the text cursor to the icon center
    #[serde(default)]
    pub dx: f32,
    #[serde(default)]
    pub dy: f32,
    /// Icon height; defaults to the line height
    #[serde(default)]
    pub size: Option<f32>,
    /// Width consumed in the line; defaults to `2 * dx`
    #[serde(default)]
    pub width: Option<f32>,
    /// Keep the icon's own colors instead of tinting it to the text color
    #[serde(default)]
    pub no_stencil: bool,
    /// Color the icon is drawn in natively
    #[serde(default = "default_icon_color")]
    pub color: String,
}

fn default_icon_color() -> String {
    "black".to_string()
}

fn icon(symbol: char, name: &str, dx: f32, size: f32) -> GlyphIcon {
    GlyphIcon {
        symbol,
        icon: name.to_string(),
        dx,
        dy: 0.0,
        size: Some(size),
        width: None,
        no_stencil: false,
        color: default_icon_color(),
    }
}

fn default_icons() -> Vec<GlyphIcon> {
    vec![
        icon('f', "foot", 24.0, 42.0),
        icon('c', "coin", 24.0, 40.0),
        GlyphIcon {
            no_stencil: true,
            ..icon('d', "die", 24.0, 40.0)
        },
        GlyphIcon {
            no_stencil: true,
            ..icon('g', "grey-die", 24.0, 40.0)
        },
        GlyphIcon {
            width: Some(44.0),
            ..icon('=', "arrow", 22.0, 30.0)
        },
    ]
}
