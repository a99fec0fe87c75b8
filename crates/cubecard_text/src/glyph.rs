//! Glyph triggers: in-text tokens that are drawn as icons instead of text

use std::fmt;

use cubecard_paint::{Color, Container, TextBaseline};
use regex::Regex;

use crate::font::FontSpec;
use crate::{Result, TextError};

/// Pattern matching glyph tokens such as `$f` or `$=`
#[derive(Clone)]
pub struct GlyphPattern {
    regex: Regex,
}

impl GlyphPattern {
    /// Compile a pattern. Patterns that can match the empty string are
    /// rejected: every match must consume at least one character.
    pub fn new(pattern: &str) -> Result<Self> {
        let invalid = |reason: String| TextError::InvalidGlyphPattern {
            pattern: pattern.to_string(),
            reason,
        };
        let regex = Regex::new(pattern).map_err(|e| invalid(e.to_string()))?;
        // Zero-width in context too, e.g. `\b` or `x*\b`
        let hir = regex_syntax::parse(pattern).map_err(|e| invalid(e.to_string()))?;
        if hir.properties().minimum_len() == Some(0) {
            return Err(invalid("can match the empty string".to_string()));
        }
        Ok(Self { regex })
    }

    /// `prefix` followed by any one of `symbols`, e.g. `('$', "fc=")`
    pub fn from_symbols(prefix: char, symbols: &str) -> Result<Self> {
        if symbols.is_empty() {
            return Err(TextError::InvalidGlyphPattern {
                pattern: prefix.to_string(),
                reason: "no symbols".to_string(),
            });
        }
        let class: String = symbols
            .chars()
            .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
            .collect();
        Self::new(&format!("{}[{}]", regex::escape(prefix.encode_utf8(&mut [0; 4])), class))
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Matched tokens, in order
    pub fn tokens<'t>(&self, line: &'t str) -> Vec<&'t str> {
        self.regex.find_iter(line).map(|m| m.as_str()).collect()
    }

    /// Text between tokens; always one more fragment than tokens
    pub fn fragments<'t>(&self, line: &'t str) -> Vec<&'t str> {
        self.regex.split(line).collect()
    }
}

impl fmt::Debug for GlyphPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("GlyphPattern").field(&self.as_str()).finish()
    }
}

/// Metrics of the text run immediately before a glyph token
#[derive(Debug, Clone, PartialEq)]
pub struct RunMetrics {
    /// Fragment text (may be empty when the token starts the line)
    pub text: String,
    pub width: f32,
    pub line_height: f32,
    pub font: FontSpec,
    pub color: Color,
    pub baseline: TextBaseline,
}

/// Places a glyph for a matched token and reports the width it consumes.
///
/// `x` is the cursor after the preceding run, `y` the line's anchor.
pub trait GlyphHandler {
    fn place_glyph(
        &self,
        cont: &mut Container,
        run: &RunMetrics,
        token: &str,
        x: f32,
        y: f32,
        line_height: f32,
    ) -> Result<f32>;
}

impl<F> GlyphHandler for F
where
    F: Fn(&mut Container, &RunMetrics, &str, f32, f32, f32) -> Result<f32>,
{
    fn place_glyph(
        &self,
        cont: &mut Container,
        run: &RunMetrics,
        token: &str,
        x: f32,
        y: f32,
        line_height: f32,
    ) -> Result<f32> {
        self(cont, run, token, x, y, line_height)
    }
}

/// Pattern plus the handler invoked for each match
#[derive(Clone, Copy)]
pub struct GlyphTrigger<'h> {
    pub pattern: &'h GlyphPattern,
    pub handler: &'h dyn GlyphHandler,
}

impl fmt::Debug for GlyphTrigger<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlyphTrigger")
            .field("pattern", self.pattern)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_are_escaped() {
        let pattern = GlyphPattern::from_symbols('$', "f=-]").unwrap();
        assert_eq!(pattern.tokens("a $f b $= c $- d $] e $x"), vec!["$f", "$=", "$-", "$]"]);
    }

    #[test]
    fn fragments_bracket_tokens() {
        let pattern = GlyphPattern::new(r"\$[fc]").unwrap();
        assert_eq!(pattern.fragments("$fGain $c"), vec!["", "Gain ", ""]);
        assert_eq!(pattern.tokens("$fGain $c"), vec!["$f", "$c"]);
        assert_eq!(pattern.fragments("plain"), vec!["plain"]);
    }

    #[test]
    fn empty_matching_patterns_are_rejected() {
        assert!(matches!(
            GlyphPattern::new(r"\$?"),
            Err(TextError::InvalidGlyphPattern { .. })
        ));
        assert!(GlyphPattern::new(r"\$[").is_err());
        // Only empty at word boundaries, never on the empty string itself
        assert!(GlyphPattern::new(r"\b").is_err());
        assert!(GlyphPattern::new(r"x*\b").is_err());
        assert!(GlyphPattern::new(r"\$f?").is_ok());
        assert!(GlyphPattern::from_symbols('$', "").is_err());
    }
}
