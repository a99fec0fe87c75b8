//! cubecard paint layer
//!
//! The drawing surface card artwork is composed on:
//!
//! - [`Color`]: RGBA colors, parsed from card palette names or hex
//! - Geometry primitives ([`Point`], [`Rect`], [`Circle`])
//! - [`Container`]: an ordered scene graph of text runs, bitmaps and shapes
//!   with bounds queries, serializable as a display list

pub mod color;
pub mod container;
pub mod primitives;

pub use color::{Color, ColorParseError};
pub use container::{
    BitmapNode, Container, Node, Shape, ShapeNode, Stroke, TextAlign, TextBaseline, TextNode,
};
pub use primitives::{Circle, Point, Rect, RoundedRect};
