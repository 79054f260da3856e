//! # Font Management
//!
//! The techpack is set in the standard PDF Helvetica faces, which need no
//! embedding. This module maps a [`FontWeight`] to the standard face and
//! measures text with the real glyph widths, so that wrapping and
//! right/centre alignment use rendered width rather than character count.

pub mod metrics;

pub use metrics::StandardFontMetrics;

use crate::style::FontWeight;

/// The standard PDF fonts used by the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    /// The PDF name for this font.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
        }
    }

    pub fn for_weight(weight: FontWeight) -> Self {
        match weight {
            FontWeight::Regular => Self::Helvetica,
            FontWeight::Bold => Self::HelveticaBold,
        }
    }
}

/// Replacement for letters WinAnsiEncoding cannot represent but which have
/// an obvious unaccented stand-in (Turkish fabric names use several).
pub fn winansi_fallback(ch: char) -> Option<char> {
    match ch {
        'ş' => Some('s'),
        'Ş' => Some('S'),
        'ğ' => Some('g'),
        'Ğ' => Some('G'),
        'ı' => Some('i'),
        'İ' => Some('I'),
        _ => None,
    }
}

/// Shared font context used by layout and PDF serialization.
#[derive(Debug, Clone, Default)]
pub struct FontContext;

impl FontContext {
    pub fn new() -> Self {
        Self
    }

    /// Get the advance width of a single character in points.
    pub fn char_width(&self, ch: char, weight: FontWeight, font_size: f64) -> f64 {
        StandardFont::for_weight(weight)
            .metrics()
            .char_width(ch, font_size)
    }

    /// Measure the width of a string in points.
    pub fn measure_string(&self, text: &str, weight: FontWeight, font_size: f64) -> f64 {
        StandardFont::for_weight(weight)
            .metrics()
            .measure_string(text, font_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_context_helvetica() {
        let ctx = FontContext::new();
        let w = ctx.char_width(' ', FontWeight::Regular, 12.0);
        assert!((w - 3.336).abs() < 0.001);
    }

    #[test]
    fn test_font_context_bold_wider() {
        let ctx = FontContext::new();
        let regular = ctx.char_width('A', FontWeight::Regular, 12.0);
        let bold = ctx.char_width('A', FontWeight::Bold, 12.0);
        assert!(bold > regular, "Bold A should be wider than regular A");
    }

    #[test]
    fn test_measure_string_sums_chars() {
        let ctx = FontContext::new();
        let w = ctx.measure_string("Hello", FontWeight::Regular, 10.0);
        // H e l l o = 722 + 556 + 222 + 222 + 556
        assert!((w - 22.78).abs() < 0.001);
    }

    #[test]
    fn test_pdf_names() {
        assert_eq!(StandardFont::for_weight(FontWeight::Regular).pdf_name(), "Helvetica");
        assert_eq!(StandardFont::for_weight(FontWeight::Bold).pdf_name(), "Helvetica-Bold");
    }

    #[test]
    fn test_turkish_fallback() {
        assert_eq!(winansi_fallback('ş'), Some('s'));
        assert_eq!(winansi_fallback('ü'), None, "ü is in WinAnsi");
    }
}
