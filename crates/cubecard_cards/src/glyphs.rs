//! Icon glyphs: `$f`-style tokens drawn as icons inline with card text

use cubecard_image::IconCache;
use cubecard_paint::{BitmapNode, Color, Container};
use cubecard_text::{GlyphHandler, GlyphPattern, GlyphTrigger, RunMetrics, TextError};
use rustc_hash::FxHashMap;

use crate::catalog::ColorMap;
use crate::style::GlyphConfig;
use crate::{CardError, Result};

/// A glyph table entry with its colors resolved
#[derive(Debug, Clone, PartialEq)]
pub struct IconSpec {
    pub icon: String,
    pub dx: f32,
    pub dy: f32,
    pub size: Option<f32>,
    pub width: Option<f32>,
    pub no_stencil: bool,
    /// Color the icon is drawn in natively
    pub color: Color,
}

impl IconSpec {
    pub fn new(icon: impl Into<String>, dx: f32, dy: f32) -> Self {
        Self {
            icon: icon.into(),
            dx,
            dy,
            size: None,
            width: None,
            no_stencil: false,
            color: Color::BLACK,
        }
    }

    /// Width the icon takes out of the line
    pub fn consumed_width(&self) -> f32 {
        self.width.unwrap_or(2.0 * self.dx)
    }

    /// Tint needed to draw this icon in `text_color`, if any
    pub fn tint_for(&self, text_color: Color) -> Option<Color> {
        if self.no_stencil || self.color.same_as(&text_color) {
            None
        } else {
            Some(text_color)
        }
    }
}

/// Glyph symbols and the pattern that finds them
#[derive(Debug, Clone)]
pub struct GlyphTable {
    pattern: GlyphPattern,
    icons: FxHashMap<char, IconSpec>,
}

impl GlyphTable {
    pub fn new(prefix: char, icons: impl IntoIterator<Item = (char, IconSpec)>) -> Result<Self> {
        let mut table = FxHashMap::default();
        let mut symbols = String::new();
        for (symbol, spec) in icons {
            if table.insert(symbol, spec).is_some() {
                return Err(CardError::DuplicateGlyph(symbol));
            }
            symbols.push(symbol);
        }
        let pattern = GlyphPattern::from_symbols(prefix, &symbols)?;
        Ok(Self {
            pattern,
            icons: table,
        })
    }

    pub fn from_config(config: &GlyphConfig, colors: &ColorMap) -> Result<Self> {
        let icons = config
            .icons
            .iter()
            .map(|icon| {
                let spec = IconSpec {
                    icon: icon.icon.clone(),
                    dx: icon.dx,
                    dy: icon.dy,
                    size: icon.size,
                    width: icon.width,
                    no_stencil: icon.no_stencil,
                    color: colors.resolve(&icon.color)?,
                };
                Ok((icon.symbol, spec))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(config.prefix, icons)
    }

    pub fn pattern(&self) -> &GlyphPattern {
        &self.pattern
    }

    /// Spec for a matched token, looked up by its last character
    pub fn lookup(&self, token: &str) -> Option<&IconSpec> {
        token.chars().last().and_then(|c| self.icons.get(&c))
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

/// Places glyph table icons through an [`IconCache`]
pub struct IconGlyphs<'a> {
    table: &'a GlyphTable,
    icons: &'a IconCache,
}

impl<'a> IconGlyphs<'a> {
    pub fn new(table: &'a GlyphTable, icons: &'a IconCache) -> Self {
        Self { table, icons }
    }

    /// Trigger for [`cubecard_text::Tweaks::glyphs`]
    pub fn trigger(&self) -> GlyphTrigger<'_> {
        GlyphTrigger {
            pattern: self.table.pattern(),
            handler: self,
        }
    }
}

impl GlyphHandler for IconGlyphs<'_> {
    fn place_glyph(
        &self,
        cont: &mut Container,
        run: &RunMetrics,
        token: &str,
        x: f32,
        y: f32,
        line_height: f32,
    ) -> cubecard_text::Result<f32> {
        let glyph_error = |source: Box<dyn std::error::Error + Send + Sync>| TextError::Glyph {
            token: token.to_string(),
            source,
        };
        let spec = self
            .table
            .lookup(token)
            .ok_or_else(|| glyph_error(Box::new(CardError::UnknownGlyph(token.to_string()))))?;

        let size = spec.size.unwrap_or(line_height);
        let tint = spec.tint_for(run.color);
        let image = self
            .icons
            .get(&spec.icon, size, tint)
            .map_err(|e| glyph_error(Box::new(e)))?;

        cont.add_child(BitmapNode {
            name: spec.icon.clone(),
            x: x + spec.dx,
            y: y + spec.dy,
            width: image.width() as f32,
            height: image.height() as f32,
            tint,
            image,
        });
        Ok(spec.consumed_width())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::CardStyle;
    use cubecard_image::MemoryLoader;
    use cubecard_paint::TextBaseline;
    use cubecard_text::FontSpec;
    use image::{Rgba, RgbaImage};

    fn icons() -> IconCache {
        IconCache::new(
            MemoryLoader::new()
                .with("foot", RgbaImage::from_pixel(90, 90, Rgba([0, 0, 0, 255])))
                .with("die", RgbaImage::from_pixel(90, 90, Rgba([200, 30, 30, 255]))),
        )
    }

    fn run(color: Color) -> RunMetrics {
        RunMetrics {
            text: "Gain 1 ".into(),
            width: 70.0,
            line_height: 40.0,
            font: FontSpec::new("Sans", 20.0),
            color,
            baseline: TextBaseline::Middle,
        }
    }

    fn table() -> GlyphTable {
        let foot = IconSpec {
            size: Some(45.0),
            ..IconSpec::new("foot", 15.0, 18.0)
        };
        let die = IconSpec {
            no_stencil: true,
            width: Some(50.0),
            ..IconSpec::new("die", 20.0, 0.0)
        };
        GlyphTable::new('$', [('f', foot), ('d', die)]).unwrap()
    }

    #[test]
    fn places_icon_at_nudged_cursor() {
        let table = table();
        let cache = icons();
        let glyphs = IconGlyphs::new(&table, &cache);
        let mut cont = Container::new();

        let consumed = glyphs
            .place_glyph(&mut cont, &run(Color::BLACK), "$f", 70.0, 100.0, 40.0)
            .unwrap();

        assert_eq!(consumed, 30.0);
        let foot = cont.bitmaps().next().unwrap();
        assert_eq!((foot.x, foot.y), (85.0, 118.0));
        assert_eq!((foot.width, foot.height), (45.0, 45.0));
        assert_eq!(foot.tint, None);
    }

    #[test]
    fn icons_are_tinted_to_differing_text_colors() {
        let table = table();
        let cache = icons();
        let glyphs = IconGlyphs::new(&table, &cache);
        let mut cont = Container::new();

        glyphs
            .place_glyph(&mut cont, &run(Color::WHITE), "$f", 0.0, 0.0, 40.0)
            .unwrap();
        let consumed = glyphs
            .place_glyph(&mut cont, &run(Color::WHITE), "$d", 0.0, 0.0, 40.0)
            .unwrap();

        let placed: Vec<_> = cont.bitmaps().collect();
        assert_eq!(placed[0].tint, Some(Color::WHITE));
        assert_eq!(placed[0].image.get_pixel(5, 5).0, [255, 255, 255, 255]);
        // no-stencil icons keep their own colors and size to the line
        assert_eq!(placed[1].tint, None);
        assert_eq!(placed[1].height, 40.0);
        assert_eq!(consumed, 50.0);
    }

    #[test]
    fn unknown_symbols_are_glyph_errors() {
        let table = table();
        let cache = icons();
        let glyphs = IconGlyphs::new(&table, &cache);
        let mut cont = Container::new();

        let err = glyphs
            .place_glyph(&mut cont, &run(Color::BLACK), "$q", 0.0, 0.0, 40.0)
            .unwrap_err();
        assert!(matches!(err, TextError::Glyph { ref token, .. } if token == "$q"));
        assert!(cont.is_empty());
    }

    #[test]
    fn duplicate_symbols_are_rejected() {
        let spec = IconSpec::new("foot", 0.0, 0.0);
        let err = GlyphTable::new('$', [('f', spec.clone()), ('f', spec)]).unwrap_err();
        assert!(matches!(err, CardError::DuplicateGlyph('f')));
    }

    #[test]
    fn default_style_table_matches_its_tokens() {
        let style = CardStyle::default();
        let table = GlyphTable::from_config(&style.glyphs, &ColorMap::default()).unwrap();
        assert_eq!(table.len(), 5);
        assert_eq!(
            table.pattern().tokens("gain $f, $c, $d, $g and $= but not $x"),
            vec!["$f", "$c", "$d", "$g", "$="]
        );
        assert_eq!(table.lookup("$=").unwrap().consumed_width(), 44.0);
        assert!(table.lookup("$d").unwrap().no_stencil);
    }
}
