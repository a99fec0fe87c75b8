//! Greedy word wrapping

use crate::font::FontSpec;
use crate::registry::TextMeasure;
use crate::Result;

/// Break each line of `text` at whitespace so lines fit `max_width`.
///
/// Explicit newlines are always kept. Runs of whitespace between words
/// collapse to one space and leading whitespace is dropped on wrapped
/// lines. A word wider than `max_width` gets a line of its own; it is never
/// split, so glyph tokens stay intact.
pub fn wrap_text(
    measure: &dyn TextMeasure,
    text: &str,
    font: &FontSpec,
    max_width: f32,
) -> Result<String> {
    let mut lines: Vec<String> = Vec::new();

    for source_line in text.split('\n') {
        let mut current = String::new();
        for word in source_line.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if measure.measure_width(&candidate, font)? > max_width {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            } else {
                current = candidate;
            }
        }
        lines.push(current);
    }

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TextError;

    /// 10px per character regardless of font
    struct Mono;

    impl TextMeasure for Mono {
        fn measure_width(&self, text: &str, _font: &FontSpec) -> Result<f32> {
            Ok(text.chars().count() as f32 * 10.0)
        }

        fn line_height(&self, _font: &FontSpec) -> Result<f32> {
            Ok(12.0)
        }
    }

    struct Broken;

    impl TextMeasure for Broken {
        fn measure_width(&self, _text: &str, font: &FontSpec) -> Result<f32> {
            Err(TextError::FontNotFound(font.to_string()))
        }

        fn line_height(&self, font: &FontSpec) -> Result<f32> {
            Err(TextError::FontNotFound(font.to_string()))
        }
    }

    fn font() -> FontSpec {
        FontSpec::new("Mono", 10.0)
    }

    /// Same words in the same order, whatever the line breaks
    fn words(text: &str) -> Vec<&str> {
        text.split_whitespace().collect()
    }

    #[test]
    fn wraps_at_word_boundaries() {
        let text = "gain 1 $f per active grey die";
        let wrapped = wrap_text(&Mono, text, &font(), 120.0).unwrap();

        assert_eq!(wrapped, "gain 1 $f\nper active\ngrey die");
        assert_eq!(words(&wrapped), words(text));
        assert!(wrapped
            .lines()
            .all(|l| Mono.measure_width(l, &font()).unwrap() <= 120.0));
    }

    #[test]
    fn keeps_explicit_newlines_and_blank_lines() {
        let wrapped = wrap_text(&Mono, "a b\n\nc", &font(), 1000.0).unwrap();
        assert_eq!(wrapped, "a b\n\nc");
    }

    #[test]
    fn long_words_get_their_own_line() {
        let wrapped = wrap_text(&Mono, "to supercalifragilistic and", &font(), 50.0).unwrap();
        assert_eq!(wrapped, "to\nsupercalifragilistic\nand");
    }

    #[test]
    fn measurement_errors_propagate() {
        assert!(wrap_text(&Broken, "one two", &font(), 50.0).is_err());
        // A single word never needs measuring
        assert_eq!(wrap_text(&Broken, "one", &font(), 50.0).unwrap(), "one");
    }
}
