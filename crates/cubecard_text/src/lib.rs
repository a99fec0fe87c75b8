//! Glyph-aware text layout for cubecard
//!
//! This crate provides:
//! - Font descriptors that round-trip CSS-style font strings
//! - Text measurement (fontdb discovery + ttf-parser metrics)
//! - The text tweaker: per-line layout with alignment, baseline and offsets,
//!   inline glyph tokens replaced by icons, and shrink-to-fit
//! - Greedy word wrapping

pub mod font;
pub mod glyph;
pub mod layout;
pub mod registry;
pub mod tweaks;
pub mod wrap;

pub use cubecard_paint::{TextAlign, TextBaseline};
pub use font::{FontFace, FontMetrics, FontSpec, FontStyle, FontWeight};
pub use glyph::{GlyphHandler, GlyphPattern, GlyphTrigger, RunMetrics};
pub use layout::{LayoutSummary, TextTweaker};
pub use registry::{FontBook, TextMeasure};
pub use tweaks::Tweaks;
pub use wrap::wrap_text;

use thiserror::Error;

/// Text layout errors
#[derive(Error, Debug)]
pub enum TextError {
    #[error("Invalid font spec {spec:?}: {reason}")]
    InvalidFontSpec { spec: String, reason: &'static str },

    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Failed to parse font: {0}")]
    FontParse(String),

    #[error("Invalid glyph pattern {pattern:?}: {reason}")]
    InvalidGlyphPattern { pattern: String, reason: String },

    #[error("Malformed glyph line {line:?}: {fragments} fragments for {tokens} tokens")]
    MalformedGlyphLine {
        line: String,
        fragments: usize,
        tokens: usize,
    },

    #[error("Fit width must be positive, got {0}")]
    InvalidFitWidth(f32),

    #[error("Glyph {token:?} could not be placed: {source}")]
    Glyph {
        token: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type Result<T> = std::result::Result<T, TextError>;
