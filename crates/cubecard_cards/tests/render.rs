use cubecard_cards::{Card, CardCatalog, CardError, CardRenderer, CardStyle, ColorMap};
use cubecard_image::{IconCache, MemoryLoader};
use cubecard_paint::{Color, Node, TextAlign};
use cubecard_text::{FontSpec, Result, TextError, TextMeasure};
use image::{Rgba, RgbaImage};

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

fn icons(names: &[&str]) -> IconCache {
    let loader = names.iter().fold(MemoryLoader::new(), |loader, name| {
        loader.with(*name, RgbaImage::from_pixel(60, 60, Rgba([0, 0, 0, 255])))
    });
    IconCache::new(loader)
}

fn all_icons() -> IconCache {
    icons(&["foot", "coin", "die", "grey-die", "arrow"])
}

fn card(name: &str, color: &str, cost: u32, run: &str) -> Card {
    Card {
        name: name.into(),
        color: color.into(),
        cost,
        now: String::new(),
        active: String::new(),
        run: run.into(),
    }
}

#[test]
fn card_face_is_shape_badge_title_then_sections() {
    let icons = all_icons();
    let renderer =
        CardRenderer::new(CardStyle::default(), ColorMap::default(), &HalfEm, &icons).unwrap();

    let cont = renderer
        .render(&card("Switch Hitter", "orange", 4, "gain $f now"))
        .unwrap();
    assert_eq!(cont.name.as_deref(), Some("Switch Hitter"));
    assert_eq!(cont.len(), 10);

    let texts: Vec<_> = cont.texts().collect();
    let strings: Vec<&str> = texts.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(strings, vec!["4", "Switch Hitter", "Run", "gain ", " now"]);

    let title = texts[1];
    assert_eq!((title.x, title.align), (375.0, TextAlign::Center));
    assert_eq!(title.font, "700 60px sans-serif");

    // Section starts below the badge: 54 + 88 + 24 = 166; label is 45 tall
    assert_eq!(texts[2].y, 188.5);
    assert_eq!((texts[3].x, texts[3].y), (54.0, 233.5));

    let foot = cont.bitmaps().next().unwrap();
    assert_eq!(foot.name, "foot");
    assert_eq!((foot.x, foot.y), (54.0 + 90.0 + 24.0, 233.5));
    assert_eq!(foot.height, 42.0);
    assert_eq!(foot.tint, None);
    assert_eq!(texts[4].x, 54.0 + 90.0 + 48.0);

    let Node::Shape(band) = &cont.children()[0] else {
        panic!("expected the card band first");
    };
    assert_eq!(band.fill, Some(Color::parse("orange").unwrap()));
}

#[test]
fn custom_glyph_nudges_follow_the_run() {
    let style = CardStyle::from_toml_str(
        r#"
[[glyphs.icon]]
symbol = "f"
icon = "foot"
dx = 15
dy = 18
size = 45
"#,
    )
    .unwrap();
    let icons = all_icons();
    let renderer = CardRenderer::new(style, ColorMap::default(), &HalfEm, &icons).unwrap();

    let cont = renderer
        .render(&card("Gainer", "green", 2, "Gain 1 $f per die"))
        .unwrap();

    // "Gain 1 " is 7 chars at 18px = 126
    let foot = cont.bitmaps().next().unwrap();
    assert_eq!((foot.x, foot.y), (54.0 + 126.0 + 15.0, 233.5 + 18.0));
    assert_eq!(foot.height, 45.0);
    let after = cont.texts().last().unwrap();
    assert_eq!(after.text, " per die");
    assert_eq!(after.x, 54.0 + 126.0 + 30.0);
}

#[test]
fn light_text_tints_stenciled_icons_only() {
    let style = CardStyle::from_toml_str("text_color = \"white\"\nbackground = \"#202020\"").unwrap();
    let icons = all_icons();
    let renderer = CardRenderer::new(style, ColorMap::default(), &HalfEm, &icons).unwrap();

    let cont = renderer
        .render(&card("Roller", "blue", 3, "$f then $d"))
        .unwrap();
    let tints: Vec<_> = cont.bitmaps().map(|b| (b.name.as_str(), b.tint)).collect();
    assert_eq!(tints, vec![("foot", Some(Color::WHITE)), ("die", None)]);
}

#[test]
fn blank_cards_skip_every_section() {
    let icons = all_icons();
    let renderer =
        CardRenderer::new(CardStyle::default(), ColorMap::default(), &HalfEm, &icons).unwrap();
    let cont = renderer.render(&card("card", "", 0, "   ")).unwrap();

    assert_eq!(cont.len(), 6);
    assert_eq!(cont.texts().count(), 2);
    assert_eq!(cont.bitmaps().count(), 0);
}

#[test]
fn long_titles_shrink_to_clear_the_badge() {
    let icons = all_icons();
    let renderer =
        CardRenderer::new(CardStyle::default(), ColorMap::default(), &HalfEm, &icons).unwrap();
    // 20 chars at 60px = 600 wide; 642 - 2 * (88 + 24) = 418 available
    let cont = renderer.render(&card(&"W".repeat(20), "red", 1, "")).unwrap();
    let title = cont.texts().nth(1).unwrap();
    assert_eq!(title.font, "700 41px sans-serif");
}

#[test]
fn catalog_failures_stay_with_their_card() {
    let catalog = CardCatalog::from_toml_str(
        r#"
[[card]]
name = "Walker"
color = "red"
run = "gain $f"
count = 2

[[card]]
name = "Banker"
color = "yellow"
run = "gain $c"
"#,
    )
    .unwrap();
    let icons = icons(&["foot"]);
    let renderer =
        CardRenderer::new(CardStyle::default(), catalog.color_map(), &HalfEm, &icons).unwrap();

    let rendered = renderer.render_catalog(&catalog);
    assert_eq!(rendered.len(), 3);
    assert_eq!(rendered[1].file_name(), "02-walker.json");
    assert!(rendered[0].display.is_ok() && rendered[1].display.is_ok());

    let banker = &rendered[2];
    assert_eq!(banker.file_name(), "03-banker.json");
    assert!(matches!(
        banker.display,
        Err(CardError::Text(TextError::Glyph { ref token, .. })) if token == "$c"
    ));
}

#[test]
fn bad_styles_fail_up_front() {
    let icons = all_icons();
    let style = CardStyle {
        text_font: "huge sans-serif".into(),
        ..CardStyle::default()
    };
    assert!(matches!(
        CardRenderer::new(style, ColorMap::default(), &HalfEm, &icons),
        Err(CardError::Text(TextError::InvalidFontSpec { .. }))
    ));

    let style = CardStyle {
        background: "plaid".into(),
        ..CardStyle::default()
    };
    assert!(matches!(
        CardRenderer::new(style, ColorMap::default(), &HalfEm, &icons),
        Err(CardError::UnknownColor(_))
    ));
}
