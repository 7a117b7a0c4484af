//! Greedy, paragraph-aware line wrapping
//!
//! Explicit newlines always break. Inside a paragraph words are packed
//! greedily against a pixel budget measured with the face that will draw
//! them. Words are never split; one that is wider than the budget gets a
//! line to itself and overflows.

use crate::{error::Result, traits::TextFace};

/// Break `message` into display lines no wider than `max_width` pixels
///
/// - An empty or all-whitespace message yields no lines.
/// - Otherwise each empty or whitespace-only paragraph yields exactly one
///   empty line.
/// - Paragraph order and count are preserved.
pub fn wrap_message(message: &str, face: &dyn TextFace, max_width: f32) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    if message.trim().is_empty() {
        return Ok(lines);
    }

    for paragraph in message.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        wrap_paragraph(paragraph, face, max_width, &mut lines)?;
    }

    log::debug!(
        "Wrapped {} chars into {} lines (max width {:.1}px, face {})",
        message.chars().count(),
        lines.len(),
        max_width,
        face.name()
    );

    Ok(lines)
}

fn wrap_paragraph(
    paragraph: &str,
    face: &dyn TextFace,
    max_width: f32,
    lines: &mut Vec<String>,
) -> Result<()> {
    let mut words = paragraph.split_whitespace();

    let Some(first) = words.next() else {
        // Blank-line intent is kept, not collapsed
        lines.push(String::new());
        return Ok(());
    };

    let mut current = first.to_string();
    for word in words {
        let candidate = format!("{current} {word}");
        if face.measure(&candidate)? <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    lines.push(current);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::MeasureError, types::TextMask, CardError};

    /// Every char is 10px wide
    struct MonoFace;

    impl TextFace for MonoFace {
        fn name(&self) -> &str {
            "mono"
        }

        fn size(&self) -> f32 {
            10.0
        }

        fn measure(&self, text: &str) -> Result<f32> {
            Ok(text.chars().count() as f32 * 10.0)
        }

        fn rasterize(&self, text: &str) -> Result<TextMask> {
            Ok(TextMask::blank(self.measure(text)?))
        }
    }

    struct BrokenFace;

    impl TextFace for BrokenFace {
        fn name(&self) -> &str {
            "broken"
        }

        fn size(&self) -> f32 {
            10.0
        }

        fn measure(&self, _text: &str) -> Result<f32> {
            Err(MeasureError::InvalidFont("truncated".into()).into())
        }

        fn rasterize(&self, _text: &str) -> Result<TextMask> {
            Err(MeasureError::InvalidFont("truncated".into()).into())
        }
    }

    fn widest_word(lines: &[String]) -> f32 {
        lines
            .iter()
            .flat_map(|l| l.split_whitespace())
            .map(|w| w.chars().count() as f32 * 10.0)
            .fold(0.0, f32::max)
    }

    #[test]
    fn test_empty_message_has_no_lines() {
        assert!(wrap_message("", &MonoFace, 100.0).unwrap().is_empty());
    }

    #[test]
    fn test_whitespace_only_message_has_no_lines() {
        assert!(wrap_message("   ", &MonoFace, 100.0).unwrap().is_empty());
        assert!(wrap_message(" \n \n", &MonoFace, 100.0).unwrap().is_empty());
        assert!(wrap_message("\r\n\t", &MonoFace, 100.0).unwrap().is_empty());
    }

    #[test]
    fn test_short_message_is_one_line() {
        let lines = wrap_message("Merry Christmas", &MonoFace, 680.0).unwrap();
        assert_eq!(lines, vec!["Merry Christmas"]);
    }

    #[test]
    fn test_blank_paragraph_is_kept() {
        let lines = wrap_message("Line one\n\nLine two", &MonoFace, 680.0).unwrap();
        assert_eq!(lines, vec!["Line one", "", "Line two"]);
    }

    #[test]
    fn test_leading_and_trailing_newlines() {
        let lines = wrap_message("\nHello\n", &MonoFace, 680.0).unwrap();
        assert_eq!(lines, vec!["", "Hello", ""]);
    }

    #[test]
    fn test_crlf_paragraphs() {
        let lines = wrap_message("Dear friend,\r\nHappy holidays", &MonoFace, 680.0).unwrap();
        assert_eq!(lines, vec!["Dear friend,", "Happy holidays"]);
    }

    #[test]
    fn test_greedy_packing() {
        // "aaa bbb" = 70px fits, "aaa bbb ccc" = 110px does not
        let lines = wrap_message("aaa bbb ccc ddd", &MonoFace, 80.0).unwrap();
        assert_eq!(lines, vec!["aaa bbb", "ccc ddd"]);
    }

    #[test]
    fn test_exact_fit_is_accepted() {
        let lines = wrap_message("aaaa bbbbb", &MonoFace, 100.0).unwrap();
        assert_eq!(lines, vec!["aaaa bbbbb"]);
    }

    #[test]
    fn test_long_word_sits_alone() {
        let lines = wrap_message("a supercalifragilistic b", &MonoFace, 50.0).unwrap();
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn test_long_greeting_wraps_within_budget() {
        let message =
            "A very very very long holiday greeting that definitely will not fit on one line";
        // 20px per char at 40px font size
        struct WideFace;
        impl TextFace for WideFace {
            fn name(&self) -> &str {
                "wide"
            }
            fn size(&self) -> f32 {
                40.0
            }
            fn measure(&self, text: &str) -> Result<f32> {
                Ok(text.chars().count() as f32 * 20.0)
            }
            fn rasterize(&self, text: &str) -> Result<TextMask> {
                Ok(TextMask::blank(self.measure(text)?))
            }
        }

        let lines = wrap_message(message, &WideFace, 680.0).unwrap();
        assert!(lines.len() >= 3, "got {lines:?}");
        for line in &lines {
            assert!(WideFace.measure(line).unwrap() <= 680.0, "{line:?} overflows");
        }
    }

    #[test]
    fn test_lines_fit_when_budget_covers_widest_word() {
        let samples = [
            "Season's greetings to you and yours",
            "Warm wishes\nfor a bright new year\n\nfrom all of us",
            "one two three four five six seven eight nine ten eleven twelve",
        ];
        for message in samples {
            for budget in [90.0, 120.0, 200.0, 400.0] {
                let lines = wrap_message(message, &MonoFace, budget).unwrap();
                if widest_word(&lines) > budget {
                    continue;
                }
                for line in &lines {
                    assert!(MonoFace.measure(line).unwrap() <= budget);
                }
            }
        }
    }

    #[test]
    fn test_rewrap_is_idempotent() {
        let message = "one two three four five six seven eight nine ten eleven twelve";
        for budget in [60.0, 100.0, 150.0, 300.0] {
            let first = wrap_message(message, &MonoFace, budget).unwrap();
            let second = wrap_message(&first.join(" "), &MonoFace, budget).unwrap();
            assert_eq!(first, second, "budget {budget}");
        }
    }

    #[test]
    fn test_paragraph_count_lower_bounds_lines() {
        let message = "a b c d e f g\n\nh i j k\nl";
        let paragraphs = message.split('\n').count();
        let lines = wrap_message(message, &MonoFace, 30.0).unwrap();
        assert!(lines.len() >= paragraphs);
    }

    #[test]
    fn test_measurement_failure_propagates() {
        match wrap_message("two words", &BrokenFace, 100.0) {
            Err(CardError::Measurement(_)) => {},
            other => panic!("expected measurement failure, got {other:?}"),
        }
    }

    #[test]
    fn test_single_word_never_measured() {
        // One word per paragraph needs no measurement at all
        let lines = wrap_message("Hello\nWorld", &BrokenFace, 100.0).unwrap();
        assert_eq!(lines, vec!["Hello", "World"]);
    }
}
