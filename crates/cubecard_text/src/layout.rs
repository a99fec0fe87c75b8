//! The text tweaker
//!
//! Lays out multi-line text as positioned runs in a [`Container`]. When a
//! glyph trigger is configured and the text contains tokens, each matching
//! line is built fragment by fragment with the tokens handed to the glyph
//! handler, which places an icon and reports the width it consumed.

use cubecard_paint::{Container, TextAlign, TextNode};

use crate::font::FontSpec;
use crate::glyph::{GlyphTrigger, RunMetrics};
use crate::registry::TextMeasure;
use crate::tweaks::Tweaks;
use crate::{Result, TextError};

/// What a layout call produced
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSummary {
    /// Font after weight override and shrink-to-fit
    pub font: FontSpec,
    pub line_height: f32,
    pub lines: usize,
    /// Widest laid-out line, glyphs included
    pub width: f32,
    /// Whether glyph substitution ran
    pub glyph_mode: bool,
}

impl LayoutSummary {
    pub fn height(&self) -> f32 {
        self.lines as f32 * self.line_height
    }
}

/// Text layout over a [`TextMeasure`]
pub struct TextTweaker<'m> {
    measure: &'m dyn TextMeasure,
    /// Card width and edge margin, for fit widths relative to the card body
    card_width: f32,
    edge: f32,
}

impl<'m> TextTweaker<'m> {
    pub fn new(measure: &'m dyn TextMeasure) -> Self {
        Self {
            measure,
            card_width: 0.0,
            edge: 0.0,
        }
    }

    /// Fit widths `<= 0` are taken relative to `card_width - 2 * edge`
    pub fn with_card_body(mut self, card_width: f32, edge: f32) -> Self {
        self.card_width = card_width;
        self.edge = edge;
        self
    }

    pub fn measure(&self) -> &'m dyn TextMeasure {
        self.measure
    }

    /// Lay out `text` into `cont`.
    ///
    /// Line `i` is anchored at `dy + (line_index + i) * line_height`. Without
    /// glyph tokens each line is a single run at `dx`, aligned by
    /// `tweaks.align`. Lines with tokens are built left to right and then
    /// shifted as a unit so the whole line honors the same alignment.
    pub fn layout(
        &self,
        cont: &mut Container,
        text: &str,
        font: &FontSpec,
        tweaks: &Tweaks<'_>,
    ) -> Result<LayoutSummary> {
        let font = match tweaks.weight {
            Some(weight) => font.with_weight(weight),
            None => font.clone(),
        };
        let font = self.make_text(text, &font, tweaks.fit_width)?;
        let line_height = match tweaks.line_height {
            Some(h) => h,
            None => self.measure.line_height(&font)?,
        };
        let line0 = tweaks.line_index as f32 * line_height;

        // Cheap whole-text check first; each line is re-checked below
        let trigger = tweaks.glyphs.filter(|g| g.pattern.is_match(text));

        let mut lines = 0;
        let mut width = 0.0f32;
        for (lineinc, line) in text.split('\n').enumerate() {
            let liney = tweaks.dy + line0 + lineinc as f32 * line_height;
            let line_width = match trigger {
                Some(trigger) if trigger.pattern.is_match(line) => self.set_text_with_glyphs(
                    cont,
                    trigger,
                    line,
                    &font,
                    line_height,
                    liney,
                    tweaks,
                )?,
                _ => self.set_plain_line(cont, line, &font, line_height, liney, tweaks)?,
            };
            width = width.max(line_width);
            lines += 1;
        }

        Ok(LayoutSummary {
            font,
            line_height,
            lines,
            width,
            glyph_mode: trigger.is_some(),
        })
    }

    fn set_plain_line(
        &self,
        cont: &mut Container,
        line: &str,
        font: &FontSpec,
        line_height: f32,
        liney: f32,
        tweaks: &Tweaks<'_>,
    ) -> Result<f32> {
        let width = self.measure.measure_width(line, font)?;
        cont.add_child(TextNode {
            text: line.to_string(),
            font: font.to_string(),
            color: tweaks.color,
            x: tweaks.dx,
            y: liney,
            width,
            line_height,
            align: tweaks.align,
            baseline: tweaks.baseline,
        });
        Ok(width)
    }

    /// Lay out a single line (no newlines) substituting glyphs for tokens.
    ///
    /// Returns the laid-out width: fragment widths plus glyph widths.
    #[allow(clippy::too_many_arguments)]
    pub fn set_text_with_glyphs(
        &self,
        cont: &mut Container,
        trigger: GlyphTrigger<'_>,
        line: &str,
        font: &FontSpec,
        line_height: f32,
        liney: f32,
        tweaks: &Tweaks<'_>,
    ) -> Result<f32> {
        let fragments = trigger.pattern.fragments(line);
        let tokens = trigger.pattern.tokens(line);
        check_lockstep(line, &fragments, &tokens)?;

        let first = cont.len();
        let font_name = font.to_string();
        let mut linex = 0.0f32;
        for (n, frag) in fragments.iter().enumerate() {
            let width = if frag.is_empty() {
                0.0
            } else {
                self.measure.measure_width(frag, font)?
            };
            if !frag.is_empty() {
                cont.add_child(TextNode {
                    text: frag.to_string(),
                    font: font_name.clone(),
                    color: tweaks.color,
                    x: linex,
                    y: liney,
                    width,
                    line_height,
                    align: TextAlign::Left,
                    baseline: tweaks.baseline,
                });
            }
            linex += width;

            if let Some(token) = tokens.get(n) {
                let run = RunMetrics {
                    text: frag.to_string(),
                    width,
                    line_height,
                    font: font.clone(),
                    color: tweaks.color,
                    baseline: tweaks.baseline,
                };
                linex += trigger
                    .handler
                    .place_glyph(cont, &run, token, linex, liney, line_height)?;
            }
        }

        cont.translate_from(first, tweaks.dx + tweaks.align.origin_offset(linex), 0.0);
        Ok(linex)
    }

    /// Resolve the font for `text`, shrinking it to `fit_width` if given
    pub fn make_text(
        &self,
        text: &str,
        font: &FontSpec,
        fit_width: Option<f32>,
    ) -> Result<FontSpec> {
        match fit_width {
            Some(max_width) => {
                let size = self.shrink_font_for_width(max_width, text, font)?;
                Ok(font.with_size(size))
            }
            None => Ok(font.clone()),
        }
    }

    /// Font size at which the widest line of `text` fits `max_width`.
    ///
    /// Returns `font.size` when it already fits, else
    /// `floor(size * max_width / widest)`.
    pub fn shrink_font_for_width(
        &self,
        max_width: f32,
        text: &str,
        font: &FontSpec,
    ) -> Result<f32> {
        let max_width = if max_width <= 0.0 {
            max_width + (self.card_width - 2.0 * self.edge)
        } else {
            max_width
        };
        if max_width <= 0.0 {
            return Err(TextError::InvalidFitWidth(max_width));
        }

        let mut widest = 0.0f32;
        for line in text.split('\n') {
            widest = widest.max(self.measure.measure_width(line, font)?);
        }
        if widest <= max_width {
            return Ok(font.size);
        }

        let size = (font.size * max_width / widest).floor();
        tracing::debug!(
            "Shrinking {} from {} to {} to fit {}",
            font.family,
            font.size,
            size,
            max_width
        );
        Ok(size.max(1.0))
    }
}

/// Exactly one fragment before each token plus the tail, and no empty tokens
fn check_lockstep(line: &str, fragments: &[&str], tokens: &[&str]) -> Result<()> {
    if fragments.len() != tokens.len() + 1 || tokens.iter().any(|t| t.is_empty()) {
        return Err(TextError::MalformedGlyphLine {
            line: line.to_string(),
            fragments: fragments.len(),
            tokens: tokens.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubecard_paint::{Color, Node, TextBaseline};

    /// Every character advances 0.5em; line height is 1.25em
    struct HalfEm;

    impl TextMeasure for HalfEm {
        fn measure_width(&self, text: &str, font: &FontSpec) -> Result<f32> {
            Ok(text.chars().count() as f32 * font.size * 0.5)
        }

        fn line_height(&self, font: &FontSpec) -> Result<f32> {
            Ok(font.size * 1.25)
        }
    }

    fn font() -> FontSpec {
        FontSpec::new("Sans", 20.0)
    }

    #[test]
    fn plain_lines_stack_from_line_index() {
        let tweaker = TextTweaker::new(&HalfEm);
        let mut cont = Container::new();
        let tweaks = Tweaks::new()
            .offset(5.0, 100.0)
            .line_index(2)
            .align(TextAlign::Right)
            .baseline(TextBaseline::Top);

        let summary = tweaker
            .layout(&mut cont, "one\ntwo three\n", &font(), &tweaks)
            .unwrap();

        assert_eq!(summary.lines, 3);
        assert_eq!(summary.line_height, 25.0);
        assert_eq!(summary.width, 90.0);
        assert!(!summary.glyph_mode);

        let runs: Vec<_> = cont.texts().collect();
        assert_eq!(runs.len(), 3);
        for (i, run) in runs.iter().enumerate() {
            assert_eq!(run.x, 5.0);
            assert_eq!(run.y, 100.0 + (2 + i) as f32 * 25.0);
            assert_eq!(run.align, TextAlign::Right);
            assert_eq!(run.baseline, TextBaseline::Top);
        }
        assert_eq!(runs[2].text, "");
    }

    #[test]
    fn line_height_override_wins() {
        let tweaker = TextTweaker::new(&HalfEm);
        let mut cont = Container::new();
        let summary = tweaker
            .layout(&mut cont, "a\nb", &font(), &Tweaks::new().line_height(40.0))
            .unwrap();
        assert_eq!(summary.line_height, 40.0);
        assert_eq!(cont.texts().nth(1).unwrap().y, 40.0);
    }

    #[test]
    fn weight_override_reaches_runs() {
        let tweaker = TextTweaker::new(&HalfEm);
        let mut cont = Container::new();
        tweaker
            .layout(
                &mut cont,
                "bold",
                &font(),
                &Tweaks::new().weight(crate::FontWeight::BOLD),
            )
            .unwrap();
        assert_eq!(cont.texts().next().unwrap().font, "700 20px Sans");
    }

    #[test]
    fn shrink_scales_down_proportionally() {
        let tweaker = TextTweaker::new(&HalfEm);
        // 20 chars at 36px = 360px wide; fit in 300 -> floor(36 * 300 / 360) = 30
        let text = "x".repeat(20);
        let size = tweaker
            .shrink_font_for_width(300.0, &text, &FontSpec::new("Sans", 36.0))
            .unwrap();
        assert_eq!(size, 30.0);
    }

    #[test]
    fn shrink_uses_card_body_for_relative_widths() {
        let tweaker = TextTweaker::new(&HalfEm).with_card_body(400.0, 50.0);
        // body is 300 wide; -100 leaves 200
        let text = "x".repeat(20);
        let size = tweaker
            .shrink_font_for_width(-100.0, &text, &FontSpec::new("Sans", 36.0))
            .unwrap();
        assert_eq!(size, 20.0);

        let bare = TextTweaker::new(&HalfEm);
        assert!(matches!(
            bare.shrink_font_for_width(0.0, &text, &font()),
            Err(TextError::InvalidFitWidth(_))
        ));
    }

    #[test]
    fn lockstep_rejects_mismatched_counts() {
        assert!(check_lockstep("a $f b", &["a ", " b"], &["$f"]).is_ok());
        assert!(check_lockstep("", &[""], &[]).is_ok());

        let err = check_lockstep("a $f b", &["a ", " b"], &["$f", "$c"]).unwrap_err();
        assert!(matches!(
            err,
            TextError::MalformedGlyphLine { fragments: 2, tokens: 2, .. }
        ));
        assert!(matches!(
            check_lockstep("ab", &["a", "b", ""], &["$f"]),
            Err(TextError::MalformedGlyphLine { fragments: 3, tokens: 1, .. })
        ));
        assert!(matches!(
            check_lockstep("ab", &["a", "b"], &[""]),
            Err(TextError::MalformedGlyphLine { .. })
        ));
    }

    #[test]
    fn glyph_handler_error_aborts_layout() {
        let tweaker = TextTweaker::new(&HalfEm);
        let pattern = crate::GlyphPattern::new(r"\$[a-z]").unwrap();
        let failing = |_: &mut Container,
                       _: &RunMetrics,
                       token: &str,
                       _: f32,
                       _: f32,
                       _: f32|
         -> Result<f32> {
            Err(TextError::Glyph {
                token: token.to_string(),
                source: "no such icon".into(),
            })
        };
        let tweaks = Tweaks::new().glyphs(GlyphTrigger {
            pattern: &pattern,
            handler: &failing,
        });

        let mut cont = Container::new();
        let err = tweaker
            .layout(&mut cont, "use $q now", &font(), &tweaks)
            .unwrap_err();
        assert!(matches!(err, TextError::Glyph { ref token, .. } if token == "$q"));
    }

    #[test]
    fn glyph_lines_honor_alignment_as_a_unit() {
        let tweaker = TextTweaker::new(&HalfEm);
        let pattern = crate::GlyphPattern::new(r"\$f").unwrap();
        let fixed = |_: &mut Container,
                     _: &RunMetrics,
                     _: &str,
                     _: f32,
                     _: f32,
                     _: f32|
         -> Result<f32> { Ok(20.0) };
        let tweaks = Tweaks::new()
            .align(TextAlign::Center)
            .offset(200.0, 0.0)
            .color(Color::WHITE)
            .glyphs(GlyphTrigger {
                pattern: &pattern,
                handler: &fixed,
            });

        let mut cont = Container::new();
        // "ab" = 20, glyph = 20, "cd" = 20 -> 60 wide, centered on 200
        let summary = tweaker.layout(&mut cont, "ab$fcd", &font(), &tweaks).unwrap();
        assert_eq!(summary.width, 60.0);

        let xs: Vec<f32> = cont
            .children()
            .iter()
            .filter_map(Node::as_text)
            .map(|t| t.x)
            .collect();
        assert_eq!(xs, vec![170.0, 210.0]);
        assert!(cont.texts().all(|t| t.align == TextAlign::Left && t.color == Color::WHITE));
    }
}
