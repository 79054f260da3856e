//! Advance widths for the standard Helvetica faces, in 1/1000 em.
//!
//! Values are from the Adobe Core 14 AFM files. Only the faces the techpack
//! document uses are carried.

use super::StandardFont;

/// Glyph widths for printable ASCII (0x20..=0x7E).
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    278, 278, 584, 584, 584, 556, 1015, // :;<=>?@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    278, 278, 278, 469, 556, 333, // [\]^_`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a-m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n-z
    334, 260, 334, 584, // {|}~
];

const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    333, 333, 584, 584, 584, 611, 975, // :;<=>?@
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    333, 278, 333, 584, 556, 333, // [\]^_`
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a-m
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n-z
    389, 280, 389, 584, // {|}~
];

/// Width table for one of the standard fonts.
pub struct StandardFontMetrics {
    ascii: &'static [u16; 95],
    bold: bool,
}

impl StandardFont {
    pub fn metrics(&self) -> StandardFontMetrics {
        match self {
            StandardFont::Helvetica => StandardFontMetrics {
                ascii: &HELVETICA_ASCII,
                bold: false,
            },
            StandardFont::HelveticaBold => StandardFontMetrics {
                ascii: &HELVETICA_BOLD_ASCII,
                bold: true,
            },
        }
    }
}

impl StandardFontMetrics {
    /// Advance width of `ch` in 1/1000 em.
    pub fn glyph_width(&self, ch: char) -> u16 {
        let ch = super::winansi_fallback(ch).unwrap_or(ch);
        let cp = ch as u32;
        if (0x20..=0x7E).contains(&cp) {
            return self.ascii[(cp - 0x20) as usize];
        }
        if let Some(base) = latin1_base_letter(ch) {
            return self.glyph_width(base);
        }
        match ch {
            '\u{00A0}' => 278,
            '²' | '³' | '¹' => 333,
            '°' => 400,
            '×' | '±' | '÷' | '¬' => 584,
            '·' => 278,
            '©' | '®' => 737,
            'µ' => if self.bold { 611 } else { 556 },
            'ß' => 611,
            'æ' => 889,
            'Æ' => 1000,
            '\u{2013}' | '€' => 556,
            '\u{2014}' | '\u{2026}' => 1000,
            '\u{2018}' | '\u{2019}' => if self.bold { 278 } else { 222 },
            '\u{201C}' | '\u{201D}' => if self.bold { 500 } else { 333 },
            '\u{2022}' => 350,
            _ => 556,
        }
    }

    /// Width of a single character in points.
    pub fn char_width(&self, ch: char, font_size: f64) -> f64 {
        self.glyph_width(ch) as f64 * font_size / 1000.0
    }

    /// Width of a string in points.
    pub fn measure_string(&self, text: &str, font_size: f64) -> f64 {
        text.chars().map(|ch| self.char_width(ch, font_size)).sum()
    }
}

/// Accented Latin-1 letters share the advance width of their base letter.
fn latin1_base_letter(ch: char) -> Option<char> {
    let base = match ch {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' | 'Ÿ' => 'Y',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'Š' => 'S',
        'š' => 's',
        'Ž' => 'Z',
        'ž' => 'z',
        _ => return None,
    };
    Some(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_width() {
        let m = StandardFont::Helvetica.metrics();
        assert!((m.char_width(' ', 12.0) - 3.336).abs() < 0.001);
    }

    #[test]
    fn accented_letters_use_base_width() {
        let m = StandardFont::Helvetica.metrics();
        assert_eq!(m.glyph_width('ü'), m.glyph_width('u'));
        assert_eq!(m.glyph_width('Ç'), m.glyph_width('C'));
    }

    #[test]
    fn turkish_letters_measure_as_their_fallback() {
        let m = StandardFont::Helvetica.metrics();
        assert_eq!(m.glyph_width('ş'), m.glyph_width('s'));
        assert_eq!(m.glyph_width('ı'), m.glyph_width('i'));
    }

    #[test]
    fn bold_is_wider() {
        let regular = StandardFont::Helvetica.metrics().measure_string("Fabric GSM", 14.0);
        let bold = StandardFont::HelveticaBold.metrics().measure_string("Fabric GSM", 14.0);
        assert!(bold > regular);
    }
}
