//! Font descriptors and parsed font faces

use std::fmt;
use std::sync::Arc;

use crate::{Result, TextError};

/// Font style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl FontStyle {
    fn keyword(s: &str) -> Option<Self> {
        match s {
            "italic" => Some(FontStyle::Italic),
            "oblique" => Some(FontStyle::Oblique),
            _ => None,
        }
    }
}

/// Font weight on the CSS 100-900 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const THIN: FontWeight = FontWeight(100);
    pub const LIGHT: FontWeight = FontWeight(300);
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const MEDIUM: FontWeight = FontWeight(500);
    pub const SEMIBOLD: FontWeight = FontWeight(600);
    pub const BOLD: FontWeight = FontWeight(700);
    pub const BLACK: FontWeight = FontWeight(900);

    /// Parse `bold`, `normal`, ... or a numeric weight
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "thin" => Some(Self::THIN),
            "light" | "lighter" => Some(Self::LIGHT),
            "medium" => Some(Self::MEDIUM),
            "semibold" => Some(Self::SEMIBOLD),
            "bold" | "bolder" => Some(Self::BOLD),
            "black" | "heavy" => Some(Self::BLACK),
            _ => s
                .parse::<u16>()
                .ok()
                .filter(|w| (1..=1000).contains(w))
                .map(FontWeight),
        }
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// A fully resolved font: family, pixel size, weight and style.
///
/// Displays as (and parses from) a CSS-style font string such as
/// `"italic 700 36px Futura"`; normal style and weight are omitted.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
    pub weight: FontWeight,
    pub style: FontStyle,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            weight: FontWeight::NORMAL,
            style: FontStyle::Normal,
        }
    }

    pub fn with_size(&self, size: f32) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }

    pub fn with_weight(&self, weight: FontWeight) -> Self {
        Self {
            weight,
            ..self.clone()
        }
    }

    pub fn with_style(&self, style: FontStyle) -> Self {
        Self {
            style,
            ..self.clone()
        }
    }

    /// Parse a CSS-style font string: `[style] [weight] <size>px <family>`
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid = |reason| TextError::InvalidFontSpec {
            spec: spec.to_string(),
            reason,
        };

        let mut style = FontStyle::Normal;
        let mut weight = FontWeight::NORMAL;
        let mut tokens = spec.split_whitespace();
        let size = loop {
            let token = tokens.next().ok_or_else(|| invalid("missing size"))?;
            let lower = token.to_ascii_lowercase();
            if let Some(px) = lower.strip_suffix("px") {
                break px.parse::<f32>().map_err(|_| invalid("bad size"))?;
            }
            if lower == "normal" {
                continue;
            }
            if let Some(s) = FontStyle::keyword(&lower) {
                style = s;
            } else if let Some(w) = FontWeight::parse(&lower) {
                weight = w;
            } else {
                return Err(invalid("unknown style or weight"));
            }
        };
        if !(size > 0.0) {
            return Err(invalid("size must be positive"));
        }

        let family = tokens
            .collect::<Vec<_>>()
            .join(" ")
            .trim_matches(|c| c == '"' || c == '\'')
            .to_string();
        if family.is_empty() {
            return Err(invalid("missing family"));
        }

        Ok(Self {
            family,
            size,
            weight,
            style,
        })
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.style {
            FontStyle::Normal => {}
            FontStyle::Italic => write!(f, "italic ")?,
            FontStyle::Oblique => write!(f, "oblique ")?,
        }
        if self.weight != FontWeight::NORMAL {
            write!(f, "{} ", self.weight.0)?;
        }
        write!(f, "{}px {}", self.size, self.family)
    }
}

impl std::str::FromStr for FontSpec {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Vertical metrics in font units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    pub units_per_em: u16,
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
}

impl FontMetrics {
    fn scale(&self, units: f32, font_size: f32) -> f32 {
        units * font_size / self.units_per_em as f32
    }

    pub fn ascender_px(&self, font_size: f32) -> f32 {
        self.scale(self.ascender as f32, font_size)
    }

    pub fn descender_px(&self, font_size: f32) -> f32 {
        self.scale(self.descender as f32, font_size)
    }

    /// Natural line height: ascender - descender + line gap
    pub fn line_height_px(&self, font_size: f32) -> f32 {
        let units = self.ascender as f32 - self.descender as f32 + self.line_gap as f32;
        self.scale(units, font_size)
    }
}

/// A parsed font file (one face of a collection)
#[derive(Clone)]
pub struct FontFace {
    data: Arc<Vec<u8>>,
    index: u32,
    metrics: FontMetrics,
}

impl FontFace {
    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        Self::from_data_with_index(data, 0)
    }

    pub fn from_data_with_index(data: Vec<u8>, index: u32) -> Result<Self> {
        let metrics = {
            let face = ttf_parser::Face::parse(&data, index)
                .map_err(|e| TextError::FontParse(e.to_string()))?;
            FontMetrics {
                units_per_em: face.units_per_em(),
                ascender: face.ascender(),
                descender: face.descender(),
                line_gap: face.line_gap(),
            }
        };
        if metrics.units_per_em == 0 {
            return Err(TextError::FontParse("units per em is zero".to_string()));
        }
        Ok(Self {
            data: Arc::new(data),
            index,
            metrics,
        })
    }

    pub fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    /// Sum of horizontal advances of `text` at `font_size`.
    ///
    /// Characters the face lacks use the `.notdef` advance.
    pub fn advance_width(&self, text: &str, font_size: f32) -> Result<f32> {
        let face = ttf_parser::Face::parse(&self.data, self.index)
            .map_err(|e| TextError::FontParse(e.to_string()))?;
        let units: u32 = text
            .chars()
            .filter(|c| !c.is_control())
            .map(|c| {
                let id = face.glyph_index(c).unwrap_or(ttf_parser::GlyphId(0));
                face.glyph_hor_advance(id).unwrap_or(0) as u32
            })
            .sum();
        Ok(self.metrics.scale(units as f32, font_size))
    }
}

impl fmt::Debug for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontFace")
            .field("bytes", &self.data.len())
            .field("index", &self.index)
            .field("metrics", &self.metrics)
            .finish()
    }
}
