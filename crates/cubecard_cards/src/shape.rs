//! Card background: a colored band around a rounded body

use cubecard_paint::{Color, Container, Rect};

/// Outline of a card, drawn as the card color band with the body inset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardShape {
    pub width: f32,
    pub height: f32,
    pub corner: f32,
    /// Band thickness; zero draws the body only
    pub border: f32,
    pub band: Color,
    pub background: Color,
}

impl CardShape {
    pub fn outer(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Body rect inside the band
    pub fn inner(&self) -> Rect {
        let b = self.border.clamp(0.0, self.width.min(self.height) / 2.0);
        Rect::new(b, b, self.width - 2.0 * b, self.height - 2.0 * b)
    }

    pub fn paint(&self, cont: &mut Container) {
        if self.border > 0.0 {
            cont.fill_rounded_rect(self.outer(), self.corner, self.band);
        }
        let inner = self.inner();
        let radius = (self.corner - (inner.x - self.outer().x)).max(0.0);
        cont.fill_rounded_rect(inner, radius, self.background);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubecard_paint::{Node, Shape};

    fn shape(border: f32) -> CardShape {
        CardShape {
            width: 750.0,
            height: 1050.0,
            corner: 36.0,
            border,
            band: Color::from_rgba8(255, 165, 0, 255),
            background: Color::WHITE,
        }
    }

    #[test]
    fn band_then_inset_body() {
        let mut cont = Container::new();
        shape(24.0).paint(&mut cont);
        assert_eq!(cont.len(), 2);

        let Node::Shape(body) = &cont.children()[1] else {
            panic!("expected shape");
        };
        let Shape::RoundedRect(rr) = &body.shape else {
            panic!("expected rounded rect");
        };
        assert_eq!(rr.rect, Rect::new(24.0, 24.0, 702.0, 1002.0));
        assert_eq!(rr.corner_radius, 12.0);
        assert_eq!(body.fill, Some(Color::WHITE));
    }

    #[test]
    fn borderless_cards_draw_body_only() {
        let mut cont = Container::new();
        shape(0.0).paint(&mut cont);
        assert_eq!(cont.len(), 1);
        assert_eq!(cont.bounds(), Some(Rect::new(0.0, 0.0, 750.0, 1050.0)));
    }
}
