//! cubecard images
//!
//! Icon bitmaps for inline glyphs and card art.
//!
//! # Features
//!
//! - Load icons by name from a directory (PNG, JPEG, WebP) or from memory
//! - Scale to a target height, preserving aspect ratio
//! - Stencil tinting: recolor an icon silhouette with a solid color
//! - A populate-on-miss cache keyed by name, size and tint
//!
//! # Example
//!
//! ```ignore
//! use cubecard_image::{DirectoryLoader, IconCache};
//! use cubecard_paint::Color;
//!
//! let cache = IconCache::new(DirectoryLoader::new("assets/icons"));
//! let foot = cache.get("foot", 45.0, Some(Color::WHITE))?;
//! ```

mod cache;
mod error;
mod loader;
mod stencil;

pub use cache::IconCache;
pub use error::{ImageError, Result};
pub use loader::{DirectoryLoader, IconFormat, IconLoader, MemoryLoader};
pub use stencil::{scale_to_height, stencil};
