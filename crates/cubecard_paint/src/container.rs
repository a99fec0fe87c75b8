//! Scene-graph container
//!
//! A [`Container`] is an ordered list of positioned children: text runs,
//! bitmaps, filled/stroked shapes and nested groups. Layout code appends to
//! it, the host walks it (or its JSON form) to produce pixels.

use std::sync::Arc;

use image::RgbaImage;
use serde::Serialize;

use crate::color::Color;
use crate::primitives::{Circle, Point, Rect, RoundedRect};

/// Horizontal anchor of a text run relative to its `x`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Offset from the anchor to the left edge of a run `width` wide
    pub fn origin_offset(self, width: f32) -> f32 {
        match self {
            TextAlign::Left => 0.0,
            TextAlign::Center => -width / 2.0,
            TextAlign::Right => -width,
        }
    }
}

/// Vertical anchor of a text run relative to its `y` (canvas `textBaseline`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    Top,
    Hanging,
    #[default]
    Middle,
    Alphabetic,
    Ideographic,
    Bottom,
}

impl TextBaseline {
    /// Offset from the anchor to the top of a line box `height` tall.
    ///
    /// Hanging/alphabetic/ideographic use typical Latin proportions of the
    /// line box; the host renderer resolves exact font baselines.
    pub fn top_offset(self, height: f32) -> f32 {
        match self {
            TextBaseline::Top => 0.0,
            TextBaseline::Hanging => -0.1 * height,
            TextBaseline::Middle => -0.5 * height,
            TextBaseline::Alphabetic => -0.8 * height,
            TextBaseline::Ideographic => -0.9 * height,
            TextBaseline::Bottom => -height,
        }
    }
}

/// A single positioned run of text in one font and color
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextNode {
    pub text: String,
    /// Resolved CSS-style font string, e.g. `"bold 36px Futura"`
    pub font: String,
    pub color: Color,
    pub x: f32,
    pub y: f32,
    /// Measured advance width
    pub width: f32,
    pub line_height: f32,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl TextNode {
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.x + self.align.origin_offset(self.width),
            self.y + self.baseline.top_offset(self.line_height),
            self.width,
            self.line_height,
        )
    }
}

/// A bitmap registered at its center
#[derive(Debug, Clone, Serialize)]
pub struct BitmapNode {
    /// Icon or image name the bitmap was loaded as
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Color the bitmap was stenciled with, if any
    pub tint: Option<Color>,
    #[serde(skip)]
    pub image: Arc<RgbaImage>,
}

impl BitmapNode {
    pub fn bounds(&self) -> Rect {
        Rect::centered(Point::new(self.x, self.y), self.width, self.height)
    }
}

impl PartialEq for BitmapNode {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.x == other.x
            && self.y == other.y
            && self.width == other.width
            && self.height == other.height
            && self.tint == other.tint
            && Arc::ptr_eq(&self.image, &other.image)
    }
}

/// Geometry of a vector shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Rect(Rect),
    RoundedRect(RoundedRect),
    Circle(Circle),
}

impl Shape {
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rect(rect) => *rect,
            Shape::RoundedRect(rounded) => rounded.rect,
            Shape::Circle(circle) => circle.bounds(),
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        match self {
            Shape::Rect(rect) => *rect = rect.translate(dx, dy),
            Shape::RoundedRect(rounded) => rounded.rect = rounded.rect.translate(dx, dy),
            Shape::Circle(circle) => {
                circle.center.x += dx;
                circle.center.y += dy;
            }
        }
    }
}

/// Outline style
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

/// A filled and/or stroked shape
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeNode {
    pub shape: Shape,
    pub fill: Option<Color>,
    pub stroke: Option<Stroke>,
}

/// A child of a [`Container`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Text(TextNode),
    Bitmap(BitmapNode),
    Shape(ShapeNode),
    Group(Container),
}

impl Node {
    /// Bounds in the parent's coordinate space
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Node::Text(text) => Some(text.bounds()),
            Node::Bitmap(bitmap) => Some(bitmap.bounds()),
            Node::Shape(shape) => Some(shape.shape.bounds()),
            Node::Group(group) => group.bounds().map(|b| b.translate(group.x, group.y)),
        }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        match self {
            Node::Text(text) => {
                text.x += dx;
                text.y += dy;
            }
            Node::Bitmap(bitmap) => {
                bitmap.x += dx;
                bitmap.y += dy;
            }
            Node::Shape(shape) => shape.shape.translate(dx, dy),
            Node::Group(group) => {
                group.x += dx;
                group.y += dy;
            }
        }
    }

    pub fn as_text(&self) -> Option<&TextNode> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bitmap(&self) -> Option<&BitmapNode> {
        match self {
            Node::Bitmap(bitmap) => Some(bitmap),
            _ => None,
        }
    }
}

/// Ordered collection of positioned children with its own origin
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Container {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub x: f32,
    pub y: f32,
    children: Vec<Node>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Container whose children are offset by `(x, y)`
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Append a child, returning its index
    pub fn add_child(&mut self, node: impl Into<Node>) -> usize {
        self.children.push(node.into());
        self.children.len() - 1
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.add_child(ShapeNode {
            shape: Shape::Rect(rect),
            fill: Some(color),
            stroke: None,
        });
    }

    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.add_child(ShapeNode {
            shape: Shape::RoundedRect(RoundedRect {
                rect,
                corner_radius: radius,
            }),
            fill: Some(color),
            stroke: None,
        });
    }

    pub fn circle(&mut self, circle: Circle, fill: Option<Color>, stroke: Option<Stroke>) {
        self.add_child(ShapeNode {
            shape: Shape::Circle(circle),
            fill,
            stroke,
        });
    }

    /// Shift every child from `start` onwards
    pub fn translate_from(&mut self, start: usize, dx: f32, dy: f32) {
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        for child in self.children.iter_mut().skip(start) {
            child.translate(dx, dy);
        }
    }

    /// Union of the children's bounds in local coordinates
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds_from(0)
    }

    /// Union of the bounds of children from `start` onwards
    pub fn bounds_from(&self, start: usize) -> Option<Rect> {
        self.children
            .iter()
            .skip(start)
            .filter_map(Node::bounds)
            .reduce(|acc, b| acc.union(&b))
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextNode> {
        self.children.iter().filter_map(Node::as_text)
    }

    pub fn bitmaps(&self) -> impl Iterator<Item = &BitmapNode> {
        self.children.iter().filter_map(Node::as_bitmap)
    }
}

impl From<TextNode> for Node {
    fn from(node: TextNode) -> Self {
        Node::Text(node)
    }
}

impl From<BitmapNode> for Node {
    fn from(node: BitmapNode) -> Self {
        Node::Bitmap(node)
    }
}

impl From<ShapeNode> for Node {
    fn from(node: ShapeNode) -> Self {
        Node::Shape(node)
    }
}

impl From<Container> for Node {
    fn from(container: Container) -> Self {
        Node::Group(container)
    }
}
