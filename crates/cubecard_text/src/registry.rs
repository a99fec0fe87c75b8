//! Font registry and text measurement
//!
//! Uses fontdb to discover fonts by family name or generic category and
//! caches parsed faces by family/weight/style.

use std::cell::RefCell;
use std::path::Path;
use std::sync::Arc;

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rustc_hash::FxHashMap;

use crate::font::{FontFace, FontSpec, FontStyle};
use crate::{Result, TextError};

/// Source of text metrics for layout
pub trait TextMeasure {
    /// Advance width of a single line of text
    fn measure_width(&self, text: &str, font: &FontSpec) -> Result<f32>;

    /// Natural line height of the font
    fn line_height(&self, font: &FontSpec) -> Result<f32>;
}

/// Font registry that discovers fonts and caches parsed faces
pub struct FontBook {
    /// fontdb database of every font loaded so far
    db: Database,
    /// Cached faces (Some = found, None = not found)
    faces: RefCell<FxHashMap<String, Option<Arc<FontFace>>>>,
}

impl FontBook {
    /// An empty registry; add fonts with [`FontBook::load_fonts_dir`]
    pub fn new() -> Self {
        Self {
            db: Database::new(),
            faces: RefCell::new(FxHashMap::default()),
        }
    }

    /// A registry preloaded with the system fonts
    pub fn with_system_fonts() -> Self {
        let mut book = Self::new();
        book.db.load_system_fonts();
        tracing::debug!("Loaded {} system font faces", book.db.len());
        book
    }

    /// Add every font file found under `dir`
    pub fn load_fonts_dir(&mut self, dir: &Path) {
        let before = self.db.len();
        self.db.load_fonts_dir(dir);
        tracing::debug!(
            "Loaded {} font faces from {}",
            self.db.len() - before,
            dir.display()
        );
        self.faces.borrow_mut().clear();
    }

    /// Add a font from memory
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.db.load_font_data(data);
        self.faces.borrow_mut().clear();
    }

    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Resolve a face for `font`, falling back to the generic sans-serif face
    pub fn face(&self, font: &FontSpec) -> Result<Arc<FontFace>> {
        let cache_key = format!(
            "{}:w{}:{:?}",
            font.family.to_ascii_lowercase(),
            font.weight.0,
            font.style
        );

        if let Some(cached) = self.faces.borrow().get(&cache_key) {
            return cached
                .clone()
                .ok_or_else(|| TextError::FontNotFound(format!("{} (cached)", font)));
        }

        let family = generic_family(&font.family).unwrap_or(Family::Name(&font.family));
        let id = self.query(family, font).or_else(|| {
            let fallback = self.query(Family::SansSerif, font);
            if fallback.is_some() {
                tracing::warn!("Font family '{}' not found, using sans-serif", font.family);
            }
            fallback
        });

        let face = match id {
            Some(id) => self
                .db
                .with_face_data(id, |data, index| {
                    FontFace::from_data_with_index(data.to_vec(), index)
                })
                .transpose()?
                .map(Arc::new),
            None => None,
        };

        self.faces.borrow_mut().insert(cache_key, face.clone());
        face.ok_or_else(|| TextError::FontNotFound(font.to_string()))
    }

    fn query(&self, family: Family<'_>, font: &FontSpec) -> Option<fontdb::ID> {
        let style = match font.style {
            FontStyle::Normal => Style::Normal,
            FontStyle::Italic => Style::Italic,
            FontStyle::Oblique => Style::Oblique,
        };
        let families = [family];
        self.db
            .query(&Query {
                families: &families,
                weight: Weight(font.weight.0),
                stretch: Stretch::Normal,
                style,
            })
            .or_else(|| {
                // Italic faces are often only published as oblique
                (font.style == FontStyle::Italic)
                    .then(|| {
                        self.db.query(&Query {
                            families: &families,
                            weight: Weight(font.weight.0),
                            stretch: Stretch::Normal,
                            style: Style::Oblique,
                        })
                    })
                    .flatten()
            })
    }
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasure for FontBook {
    fn measure_width(&self, text: &str, font: &FontSpec) -> Result<f32> {
        self.face(font)?.advance_width(text, font.size)
    }

    fn line_height(&self, font: &FontSpec) -> Result<f32> {
        Ok(self.face(font)?.metrics().line_height_px(font.size))
    }
}

fn generic_family(name: &str) -> Option<Family<'static>> {
    match name.to_ascii_lowercase().as_str() {
        "sans-serif" | "sans" => Some(Family::SansSerif),
        "serif" => Some(Family::Serif),
        "monospace" => Some(Family::Monospace),
        "cursive" => Some(Family::Cursive),
        "fantasy" => Some(Family::Fantasy),
        _ => None,
    }
}
