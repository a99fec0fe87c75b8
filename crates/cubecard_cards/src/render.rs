//! Card face layout

use cubecard_image::IconCache;
use cubecard_paint::{Circle, Color, Container, Point, Stroke, TextAlign, TextBaseline};
use cubecard_text::{wrap_text, FontSpec, TextMeasure, TextTweaker, Tweaks};

use crate::catalog::{Card, CardCatalog, ColorMap};
use crate::glyphs::{GlyphTable, IconGlyphs};
use crate::shape::CardShape;
use crate::style::CardStyle;
use crate::Result;

/// Inner disc of the cost badge, relative to its radius
const COST_INNER: f32 = 0.75;

/// One card of an expanded catalog and its display list (or why it failed)
#[derive(Debug)]
pub struct RenderedCard {
    /// 1-based position in the expanded catalog
    pub index: usize,
    pub card: Card,
    pub display: Result<Container>,
}

impl RenderedCard {
    /// `NN-<slug>.json`
    pub fn file_name(&self) -> String {
        format!("{:02}-{}.json", self.index, self.card.slug())
    }
}

/// Lays out whole card faces
pub struct CardRenderer<'a> {
    style: CardStyle,
    colors: ColorMap,
    measure: &'a dyn TextMeasure,
    icons: &'a IconCache,
    glyphs: GlyphTable,
    text_color: Color,
    background: Color,
    title_font: FontSpec,
    label_font: FontSpec,
    text_font: FontSpec,
    cost_font: FontSpec,
}

impl<'a> CardRenderer<'a> {
    /// Resolve the style's fonts, colors and glyph table up front so a bad
    /// style fails once instead of on every card
    pub fn new(
        style: CardStyle,
        colors: ColorMap,
        measure: &'a dyn TextMeasure,
        icons: &'a IconCache,
    ) -> Result<Self> {
        let glyphs = GlyphTable::from_config(&style.glyphs, &colors)?;
        Ok(Self {
            text_color: colors.resolve(&style.text_color)?,
            background: colors.resolve(&style.background)?,
            title_font: FontSpec::parse(&style.title_font)?,
            label_font: FontSpec::parse(&style.label_font)?,
            text_font: FontSpec::parse(&style.text_font)?,
            cost_font: FontSpec::parse(&style.cost_font)?,
            glyphs,
            style,
            colors,
            measure,
            icons,
        })
    }

    pub fn style(&self) -> &CardStyle {
        &self.style
    }

    pub fn glyphs(&self) -> &GlyphTable {
        &self.glyphs
    }

    /// Lay out one card: background, title, cost badge and effect sections
    pub fn render(&self, card: &Card) -> Result<Container> {
        let style = &self.style;
        let band = self.colors.resolve(card.color_name())?;
        let tweaker =
            TextTweaker::new(self.measure).with_card_body(style.width, style.content_left());
        let mut cont = Container::named(card.name.clone());

        CardShape {
            width: style.width,
            height: style.height,
            corner: style.corner,
            border: style.border,
            band,
            background: self.background,
        }
        .paint(&mut cont);

        let left = style.content_left();
        let badge_y = left + style.cost_radius;
        let badge = Point::new(left + style.cost_radius, badge_y);
        self.paint_cost(&mut cont, card.cost, band, badge)?;

        // Title is centered on the card and kept clear of the badge on both sides
        let title = tweaker.layout(
            &mut cont,
            &card.name,
            &self.title_font,
            &Tweaks::new()
                .align(TextAlign::Center)
                .baseline(TextBaseline::Middle)
                .color(self.text_color)
                .offset(style.width / 2.0, badge_y)
                .fit_width(-2.0 * (2.0 * style.cost_radius + style.gap)),
        )?;
        if title.font.size < self.title_font.size {
            tracing::debug!("Title '{}' shrunk to {}px", card.name, title.font.size);
        }

        let mut y = left + 2.0 * style.cost_radius + style.gap;
        let sections = [("Now", &card.now), ("Active", &card.active), ("Run", &card.run)];
        for (label, body) in sections {
            if body.trim().is_empty() {
                continue;
            }
            y = self.paint_section(&tweaker, &mut cont, label, body, y)?;
        }

        let bottom = style.height - left;
        if y > bottom {
            tracing::warn!("Card '{}' overflows by {:.0}px", card.name, y - bottom);
        }
        Ok(cont)
    }

    /// Every card in `catalog`, copies included. A failing card does not
    /// stop the others.
    pub fn render_catalog(&self, catalog: &CardCatalog) -> Vec<RenderedCard> {
        catalog
            .expanded()
            .enumerate()
            .map(|(i, card)| RenderedCard {
                index: i + 1,
                card: card.clone(),
                display: self.render(card),
            })
            .collect()
    }

    /// Two concentric discs with the cost in the middle
    fn paint_cost(
        &self,
        cont: &mut Container,
        cost: u32,
        band: Color,
        center: Point,
    ) -> Result<()> {
        let radius = self.style.cost_radius;
        cont.circle(
            Circle::new(center, radius),
            Some(band),
            Some(Stroke {
                color: self.text_color,
                width: 2.0,
            }),
        );
        cont.circle(Circle::new(center, radius * COST_INNER), Some(Color::WHITE), None);

        let tweaker = TextTweaker::new(self.measure);
        tweaker.layout(
            cont,
            &cost.to_string(),
            &self.cost_font,
            &Tweaks::new()
                .color(self.text_color)
                .offset(center.x, center.y)
                .fit_width(2.0 * radius * COST_INNER),
        )?;
        Ok(())
    }

    /// Label line plus the wrapped body; returns the y below the section
    fn paint_section(
        &self,
        tweaker: &TextTweaker<'_>,
        cont: &mut Container,
        label: &str,
        body: &str,
        y: f32,
    ) -> Result<f32> {
        let left = self.style.content_left();

        let label_height = self.measure.line_height(&self.label_font)?;
        let heading = tweaker.layout(
            cont,
            label,
            &self.label_font,
            &Tweaks::new()
                .align(TextAlign::Left)
                .color(self.text_color)
                .offset(left, y + label_height / 2.0),
        )?;
        let y = y + heading.height();

        let text = wrap_text(
            self.measure,
            body.trim(),
            &self.text_font,
            self.style.content_width(),
        )?;
        let line_height = self.measure.line_height(&self.text_font)?;
        let icons = IconGlyphs::new(&self.glyphs, self.icons);
        let laid = tweaker.layout(
            cont,
            &text,
            &self.text_font,
            &Tweaks::new()
                .align(TextAlign::Left)
                .color(self.text_color)
                .offset(left, y + line_height / 2.0)
                .glyphs(icons.trigger()),
        )?;
        Ok(y + laid.height() + self.style.gap)
    }
}
