//! Per-call layout options

use cubecard_paint::{Color, TextAlign, TextBaseline};

use crate::font::FontWeight;
use crate::glyph::GlyphTrigger;

/// Options for one [`TextTweaker::layout`](crate::TextTweaker::layout) call
#[derive(Debug, Clone, Copy)]
pub struct Tweaks<'h> {
    /// Horizontal anchor of each line
    pub align: TextAlign,
    /// Vertical anchor of each run
    pub baseline: TextBaseline,
    pub color: Color,
    /// Offset of the whole block
    pub dx: f32,
    pub dy: f32,
    /// Overrides the font's natural line height
    pub line_height: Option<f32>,
    /// First line number; the block starts `line_index` lines down
    pub line_index: u32,
    /// Replaces the font's weight before layout
    pub weight: Option<FontWeight>,
    /// Shrink the font so the widest line fits this width
    pub fit_width: Option<f32>,
    /// Inline glyph tokens and the handler that draws them
    pub glyphs: Option<GlyphTrigger<'h>>,
}

impl Default for Tweaks<'_> {
    fn default() -> Self {
        Self {
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
            color: Color::BLACK,
            dx: 0.0,
            dy: 0.0,
            line_height: None,
            line_index: 0,
            weight: None,
            fit_width: None,
            glyphs: None,
        }
    }
}

impl<'h> Tweaks<'h> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn offset(mut self, dx: f32, dy: f32) -> Self {
        self.dx = dx;
        self.dy = dy;
        self
    }

    pub fn line_height(mut self, line_height: f32) -> Self {
        self.line_height = Some(line_height);
        self
    }

    pub fn line_index(mut self, line_index: u32) -> Self {
        self.line_index = line_index;
        self
    }

    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn fit_width(mut self, width: f32) -> Self {
        self.fit_width = Some(width);
        self
    }

    pub fn glyphs(mut self, trigger: GlyphTrigger<'h>) -> Self {
        self.glyphs = Some(trigger);
        self
    }
}
