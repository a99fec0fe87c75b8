//! Cards for the cube/dice expansion
//!
//! - [`CardCatalog`]: card content loaded from TOML, with the color map
//! - [`CardStyle`]: geometry, fonts and the glyph table
//! - [`IconGlyphs`]: glyph handler that draws `$f`-style tokens as icons
//! - [`CardShape`]: the card background
//! - [`CardRenderer`]: lays out a whole card into a display list

pub mod catalog;
pub mod glyphs;
pub mod render;
pub mod shape;
pub mod style;

pub use catalog::{Card, CardCatalog, CardEntry, ColorMap};
pub use glyphs::{GlyphTable, IconGlyphs, IconSpec};
pub use render::{CardRenderer, RenderedCard};
pub use shape::CardShape;
pub use style::{CardStyle, GlyphConfig, GlyphIcon};

use std::path::PathBuf;

use cubecard_image::ImageError;
use cubecard_text::TextError;
use thiserror::Error;

/// Card configuration and rendering errors
#[derive(Error, Debug)]
pub enum CardError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse card config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Unknown color: {0:?}")]
    UnknownColor(String),

    #[error("Unknown glyph: {0:?}")]
    UnknownGlyph(String),

    #[error("Glyph symbol {0:?} is defined twice")]
    DuplicateGlyph(char),

    #[error(transparent)]
    Text(#[from] TextError),

    #[error(transparent)]
    Image(#[from] ImageError),
}

pub type Result<T> = std::result::Result<T, CardError>;
