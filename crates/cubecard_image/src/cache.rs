//! Read-through icon cache

use std::cell::RefCell;
use std::sync::Arc;

use cubecard_paint::Color;
use image::RgbaImage;
use rustc_hash::FxHashMap;

use crate::error::{ImageError, Result};
use crate::loader::IconLoader;
use crate::stencil::{scale_to_height, stencil};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    name: String,
    height: u32,
    tint: Option<[u8; 4]>,
}

/// Icons by name, scaled and optionally tinted, loaded on first use.
///
/// Entries are never evicted: a card set uses a handful of icons at a
/// handful of sizes.
pub struct IconCache {
    loader: Box<dyn IconLoader>,
    /// Decoded full-resolution sources
    sources: RefCell<FxHashMap<String, Arc<RgbaImage>>>,
    /// Scaled (and tinted) renditions
    renditions: RefCell<FxHashMap<CacheKey, Arc<RgbaImage>>>,
}

impl IconCache {
    pub fn new(loader: impl IconLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            sources: RefCell::new(FxHashMap::default()),
            renditions: RefCell::new(FxHashMap::default()),
        }
    }

    /// `name` scaled to `height` px, stenciled with `tint` if given
    pub fn get(&self, name: &str, height: f32, tint: Option<Color>) -> Result<Arc<RgbaImage>> {
        if !height.is_finite() || height < 0.5 {
            return Err(ImageError::InvalidSize(height));
        }
        let key = CacheKey {
            name: name.to_string(),
            height: height.round() as u32,
            tint: tint.map(|c| c.to_rgba8()),
        };
        if let Some(hit) = self.renditions.borrow().get(&key) {
            return Ok(Arc::clone(hit));
        }

        let source = self.source(name)?;
        let mut image = scale_to_height(&source, key.height);
        if let Some(color) = tint {
            image = stencil(&image, color);
        }
        tracing::debug!(
            "Cached icon '{}' at {}px (tint: {:?})",
            name,
            key.height,
            tint.map(|c| c.to_hex_string())
        );

        let image = Arc::new(image);
        self.renditions.borrow_mut().insert(key, Arc::clone(&image));
        Ok(image)
    }

    fn source(&self, name: &str) -> Result<Arc<RgbaImage>> {
        if let Some(hit) = self.sources.borrow().get(name) {
            return Ok(Arc::clone(hit));
        }
        let image = Arc::new(self.loader.load(name)?);
        self.sources
            .borrow_mut()
            .insert(name.to_string(), Arc::clone(&image));
        Ok(image)
    }

    /// Number of distinct scaled/tinted renditions held
    pub fn len(&self) -> usize {
        self.renditions.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.renditions.borrow().is_empty()
    }

    /// Drop every cached bitmap; the next `get` reloads from the loader
    pub fn clear(&self) {
        self.sources.borrow_mut().clear();
        self.renditions.borrow_mut().clear();
    }
}
