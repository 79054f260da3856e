//! # Text Layout
//!
//! Greedy line breaking for long-form instructions. Lines are filled up to
//! the column width as measured with the real glyph widths from
//! [`FontContext`], breaking at UAX#14 opportunities. Explicit newlines in
//! the input are kept, and a word wider than the column is split where it
//! overflows.

use crate::font::FontContext;
use crate::style::FontWeight;
use unicode_linebreak::{linebreaks, BreakOpportunity};

/// A line of text after line-breaking.
#[derive(Debug, Clone, PartialEq)]
pub struct BrokenLine {
    pub text: String,
    /// Rendered width in points.
    pub width: f64,
}

/// Compute UAX#14 break opportunities indexed by char position.
///
/// Each entry is the break opportunity *before* that character. Index 0 is
/// always `None`.
fn compute_break_opportunities(text: &str) -> Vec<Option<BreakOpportunity>> {
    let char_count = text.chars().count();
    let mut result = vec![None; char_count];

    let byte_to_char: Vec<usize> = {
        let mut map = vec![0usize; text.len() + 1];
        let mut char_idx = 0;
        for (byte_idx, _) in text.char_indices() {
            map[byte_idx] = char_idx;
            char_idx += 1;
        }
        map[text.len()] = char_idx;
        map
    };

    for (byte_offset, opp) in linebreaks(text) {
        let char_idx = byte_to_char[byte_offset];
        // A break at text.len() is the end of input, not a line.
        if char_idx < char_count {
            result[char_idx] = Some(opp);
        }
    }

    result
}

fn is_newline(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

#[derive(Debug, Clone, Default)]
pub struct TextLayout;

impl TextLayout {
    pub fn new() -> Self {
        Self
    }

    /// Break a string into lines that fit within `max_width` points.
    pub fn break_into_lines(
        &self,
        font_context: &FontContext,
        text: &str,
        max_width: f64,
        font_size: f64,
        weight: FontWeight,
    ) -> Vec<BrokenLine> {
        if text.is_empty() {
            return vec![BrokenLine {
                text: String::new(),
                width: 0.0,
            }];
        }

        let chars: Vec<char> = text.chars().collect();
        let char_widths: Vec<f64> = chars
            .iter()
            .map(|&ch| {
                if is_newline(ch) {
                    0.0
                } else {
                    font_context.char_width(ch, weight, font_size)
                }
            })
            .collect();
        let break_opps = compute_break_opportunities(text);

        let make_line = |slice: &[char]| -> BrokenLine {
            let line: String = slice.iter().filter(|c| !is_newline(**c)).collect();
            let trimmed = line.trim_end().to_string();
            let width = font_context.measure_string(&trimmed, weight, font_size);
            BrokenLine {
                text: trimmed,
                width,
            }
        };

        let mut lines = Vec::new();
        let mut line_start = 0;
        let mut line_width = 0.0;
        let mut last_break_point: Option<usize> = None;

        for (i, &ch) in chars.iter().enumerate() {
            let char_width = char_widths[i];

            if i > 0 {
                match break_opps[i] {
                    Some(BreakOpportunity::Mandatory) => {
                        lines.push(make_line(&chars[line_start..i]));
                        line_start = i;
                        line_width = 0.0;
                        last_break_point = None;
                    }
                    Some(BreakOpportunity::Allowed) => {
                        // The line may end with char[i-1].
                        last_break_point = Some(i - 1);
                    }
                    None => {}
                }
            }

            if is_newline(ch) {
                continue;
            }

            if line_width + char_width > max_width && line_start < i {
                if let Some(bp) = last_break_point.filter(|bp| *bp >= line_start) {
                    lines.push(make_line(&chars[line_start..=bp]));
                    line_start = bp + 1;
                    line_width = char_widths[line_start..=i].iter().sum();
                    last_break_point = None;
                    continue;
                }

                // No break opportunity on this line: split the word here.
                lines.push(make_line(&chars[line_start..i]));
                line_start = i;
                line_width = char_width;
                last_break_point = None;
                continue;
            }

            line_width += char_width;
        }

        lines.push(make_line(&chars[line_start..]));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(text: &str, max_width: f64) -> Vec<String> {
        TextLayout::new()
            .break_into_lines(&FontContext::new(), text, max_width, 12.0, FontWeight::Regular)
            .into_iter()
            .map(|l| l.text)
            .collect()
    }

    #[test]
    fn short_text_is_one_line() {
        assert_eq!(wrap("Hello world", 500.0), vec!["Hello world"]);
    }

    #[test]
    fn wraps_at_spaces() {
        // "Hello " at 12pt is about 30pt; force a break after the first word.
        let lines = wrap("Hello world", 40.0);
        assert_eq!(lines, vec!["Hello", "world"]);
    }

    #[test]
    fn every_line_fits() {
        let text = "Double needle coverstitch at hem and sleeve openings, \
                    single needle topstitch on the neckband, \
                    bartack at pocket corners.";
        let ctx = FontContext::new();
        let lines =
            TextLayout::new().break_into_lines(&ctx, text, 120.0, 12.0, FontWeight::Regular);
        assert!(lines.len() > 3);
        for line in &lines {
            assert!(line.width <= 120.0 + 1e-6, "{:?} too wide", line);
        }
        let rejoined: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(rejoined.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn width_not_char_count_decides() {
        // Same character count, very different rendered widths.
        let narrow = wrap("iiiiiiiiii iiiiiiiiii", 60.0);
        let wide = wrap("WWWWWWWWWW WWWWWWWWWW", 60.0);
        assert_eq!(narrow.len(), 1);
        assert!(wide.len() > 2);
    }

    #[test]
    fn explicit_newlines_are_kept() {
        assert_eq!(wrap("line one\nline two", 500.0), vec!["line one", "line two"]);
        assert_eq!(wrap("a\r\nb", 500.0), vec!["a", "b"]);
    }

    #[test]
    fn blank_line_preserved() {
        assert_eq!(wrap("a\n\nb", 500.0), vec!["a", "", "b"]);
    }

    #[test]
    fn long_word_is_split() {
        let lines = wrap("XXXXXXXXXXXXXXXXXXXX", 50.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "XXXXXXXXXXXXXXXXXXXX");
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        assert_eq!(wrap("", 100.0), vec![""]);
    }
}
