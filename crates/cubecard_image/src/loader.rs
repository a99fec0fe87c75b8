//! Icon sources

use std::path::{Path, PathBuf};

use image::RgbaImage;
use rustc_hash::FxHashMap;

use crate::error::{ImageError, Result};

/// Loads full-resolution icon bitmaps by name
pub trait IconLoader {
    fn load(&self, name: &str) -> Result<RgbaImage>;
}

/// Image format of an icon file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconFormat {
    Png,
    Jpeg,
    WebP,
}

impl IconFormat {
    /// Extensions tried, in order, when resolving a name
    pub const SEARCH_ORDER: [(&'static str, IconFormat); 4] = [
        ("png", IconFormat::Png),
        ("jpg", IconFormat::Jpeg),
        ("jpeg", IconFormat::Jpeg),
        ("webp", IconFormat::WebP),
    ];

    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    fn image_format(self) -> image::ImageFormat {
        match self {
            IconFormat::Png => image::ImageFormat::Png,
            IconFormat::Jpeg => image::ImageFormat::Jpeg,
            IconFormat::WebP => image::ImageFormat::WebP,
        }
    }
}

/// Loads `<root>/<name>.<ext>`
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    root: PathBuf,
}

impl DirectoryLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// First existing file for `name`, if any
    pub fn resolve(&self, name: &str) -> Option<(PathBuf, IconFormat)> {
        // Names are bare identifiers, never paths
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return None;
        }
        IconFormat::SEARCH_ORDER.iter().find_map(|(ext, format)| {
            let path = self.root.join(format!("{name}.{ext}"));
            path.is_file().then_some((path, *format))
        })
    }
}

impl IconLoader for DirectoryLoader {
    fn load(&self, name: &str) -> Result<RgbaImage> {
        let (path, format) = self
            .resolve(name)
            .ok_or_else(|| ImageError::NotFound(name.to_string()))?;
        let bytes = std::fs::read(&path).map_err(|source| ImageError::Io {
            path: path.clone(),
            source,
        })?;
        let decoded = image::load_from_memory_with_format(&bytes, format.image_format())?;
        tracing::debug!(
            "Loaded icon '{}' from {} ({}x{})",
            name,
            path.display(),
            decoded.width(),
            decoded.height()
        );
        Ok(decoded.to_rgba8())
    }
}

/// Icons held in memory, for generated or embedded art
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    icons: FxHashMap<String, RgbaImage>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, image: RgbaImage) {
        self.icons.insert(name.into(), image);
    }

    pub fn with(mut self, name: impl Into<String>, image: RgbaImage) -> Self {
        self.insert(name, image);
        self
    }
}

impl IconLoader for MemoryLoader {
    fn load(&self, name: &str) -> Result<RgbaImage> {
        self.icons
            .get(name)
            .cloned()
            .ok_or_else(|| ImageError::NotFound(name.to_string()))
    }
}
