//! Color types and utilities

use serde::{Serialize, Serializer};
use thiserror::Error;

/// RGBA color with f32 components (0.0 to 1.0)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Failure to resolve a color name or hex literal
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unrecognized color: {0:?}")]
pub struct ColorParseError(pub String);

/// Named colors understood by [`Color::parse`].
///
/// Covers the card palette plus the neutrals used for card chrome.
const NAMED: &[(&str, u32)] = &[
    ("black", 0x000000),
    ("white", 0xFFFFFF),
    ("red", 0xFF0000),
    ("orange", 0xFFA500),
    ("yellow", 0xFFFF00),
    ("green", 0x008000),
    ("blue", 0x0000FF),
    ("magenta", 0xFF00FF),
    ("brown", 0xA52A2A),
    ("purple", 0x800080),
    ("lavender", 0xE6E6FA),
    ("grey", 0x808080),
    ("gray", 0x808080),
    ("lightgrey", 0xD3D3D3),
    ("darkgrey", 0xA9A9A9),
    ("tan", 0xD2B48C),
    ("gold", 0xFFD700),
];

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create from u8 components (0-255)
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create from hex value (0xRRGGBB or 0xRRGGBBAA)
    pub fn from_hex(hex: u32) -> Self {
        if hex > 0xFFFFFF {
            Self::from_rgba8(
                ((hex >> 24) & 0xFF) as u8,
                ((hex >> 16) & 0xFF) as u8,
                ((hex >> 8) & 0xFF) as u8,
                (hex & 0xFF) as u8,
            )
        } else {
            Self::from_rgba8(
                ((hex >> 16) & 0xFF) as u8,
                ((hex >> 8) & 0xFF) as u8,
                (hex & 0xFF) as u8,
                255,
            )
        }
    }

    /// Parse a color name (`"orange"`), `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn parse(s: &str) -> Result<Self, ColorParseError> {
        let trimmed = s.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            // from_str_radix alone would also take a leading '+'
            if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(ColorParseError(s.to_string()));
            }
            let expanded: String = match hex.len() {
                3 => hex.chars().flat_map(|c| [c, c]).collect(),
                6 | 8 => hex.to_string(),
                _ => return Err(ColorParseError(s.to_string())),
            };
            let value =
                u32::from_str_radix(&expanded, 16).map_err(|_| ColorParseError(s.to_string()))?;
            return Ok(if expanded.len() == 8 {
                // 0x000000AA would be read as 0xRRGGBB by from_hex
                let [r, g, b, a] = value.to_be_bytes();
                Self::from_rgba8(r, g, b, a)
            } else {
                Self::from_hex(value)
            });
        }

        let lower = trimmed.to_ascii_lowercase();
        if lower == "transparent" {
            return Ok(Self::TRANSPARENT);
        }
        NAMED
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, hex)| Self::from_hex(*hex))
            .ok_or_else(|| ColorParseError(s.to_string()))
    }

    /// Create a grayscale color
    pub fn gray(value: f32) -> Self {
        Self::rgb(value, value, value)
    }

    /// Set alpha and return new color
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { a: alpha, ..self }
    }

    /// Convert to u8 array [r, g, b, a]
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque
    pub fn to_hex_string(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// Compare at 8-bit precision, which is what ends up on the page.
    pub fn same_as(&self, other: &Color) -> bool {
        self.to_rgba8() == other.to_rgba8()
    }
}

impl std::str::FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!(Color::parse("Orange").unwrap().to_rgba8(), [255, 165, 0, 255]);
        assert_eq!(Color::parse("white").unwrap(), Color::WHITE);
        assert!(Color::parse("chartreuse-ish").is_err());
    }

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Color::parse("#fff").unwrap(), Color::WHITE);
        assert_eq!(Color::parse("#000000").unwrap(), Color::BLACK);
        assert_eq!(Color::parse("#00000080").unwrap().to_rgba8(), [0, 0, 0, 128]);
        assert!(Color::parse("#12345").is_err());
    }

    #[test]
    fn hex_rejects_signs_and_non_hex_digits() {
        assert!(Color::parse("#+fffff").is_err());
        assert!(Color::parse("#+ff").is_err());
        assert!(Color::parse("#ggg").is_err());
        assert!(Color::parse("#ﬀ").is_err());
    }

    #[test]
    fn hex_string_drops_opaque_alpha() {
        assert_eq!(Color::from_hex(0xE6E6FA).to_hex_string(), "#e6e6fa");
        assert_eq!(
            Color::BLACK.with_alpha(0.5).to_hex_string(),
            "#00000080"
        );
    }

    #[test]
    fn same_as_ignores_float_noise() {
        let a = Color::rgb(0.5, 0.5, 0.5);
        let b = Color::rgb(0.5001, 0.5003, 0.5);
        assert!(a.same_as(&b));
        assert!(!a.same_as(&Color::BLACK));
    }
}
