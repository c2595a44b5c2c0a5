//! The two standard PDF fonts a receipt is set in. Standard fonts are not
//! embedded; every viewer ships them, so all we need are their advance widths
//! (from the Adobe Core 14 AFM files, in 1/1000 em) to measure text.

use crate::latin::{base_letter, win_ansi_byte};

/// Advance widths of the printable ASCII range `' '..='~'`
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n..z
    334, 260, 334, 584, // {..~
];

const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    333, 333, 584, 584, 584, 611, 975, // :..@
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    333, 278, 333, 584, 556, 333, // [..`
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a..m
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n..z
    389, 280, 389, 584, // {..~
];

/// One of the standard (non-embedded) Helvetica faces
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    /// The PostScript name the font is referred to by in the PDF
    pub fn base_font(&self) -> &'static [u8] {
        match self {
            StandardFont::Helvetica => b"Helvetica",
            StandardFont::HelveticaBold => b"Helvetica-Bold",
        }
    }

    /// AFM ascender, in font units
    pub fn ascender(&self) -> i16 {
        718
    }

    /// AFM descender, in font units
    pub fn descender(&self) -> i16 {
        -207
    }

    pub fn line_gap(&self) -> i16 {
        231
    }

    pub fn units_per_em(&self) -> u16 {
        1000
    }

    /// The character that will actually be drawn for `ch`: characters outside
    /// WinAnsiEncoding are shown as `?`
    pub fn drawn_char(&self, ch: char) -> char {
        if win_ansi_byte(ch).is_some() {
            ch
        } else {
            '?'
        }
    }

    /// Horizontal advance of `ch` in font units
    pub fn advance(&self, ch: char) -> u16 {
        let ch = self.drawn_char(ch);
        let bold = *self == StandardFont::HelveticaBold;
        let ascii = if bold {
            &HELVETICA_BOLD_ASCII
        } else {
            &HELVETICA_ASCII
        };

        if let ' '..='~' = ch {
            return ascii[ch as usize - ' ' as usize];
        }

        match ch {
            '\u{a0}' | '·' => 278,
            'ì'..='ï' => 278,
            'ª' => 370,
            'º' => 365,
            '°' => 400,
            '§' | '«' | '»' | '€' | '–' | '¢' | '£' | '¥' => 556,
            '¡' | '´' | '¨' | '\u{ad}' => 333,
            '±' | '×' | '÷' | '¬' => 584,
            '©' | '®' => 737,
            '¿' | 'ß' => 611,
            'Æ' | 'Œ' | '—' | '…' | '‰' | '™' => 1000,
            'æ' => 889,
            'œ' => 944,
            'ƒ' | '†' | '‡' => 556,
            'ˆ' | '˜' | '‹' | '›' => 333,
            'Ð' => 722,
            'Þ' => 667,
            'ð' | 'þ' | 'µ' => {
                if bold {
                    611
                } else {
                    556
                }
            }
            '‘' | '’' | '‚' => {
                if bold {
                    278
                } else {
                    222
                }
            }
            '“' | '”' | '„' => {
                if bold {
                    500
                } else {
                    333
                }
            }
            '•' => 350,
            _ => {
                let base = base_letter(ch);
                if base != ch {
                    self.advance(base)
                } else {
                    556
                }
            }
        }
    }

    /// Appends the hex string body for `text` (WinAnsi bytes) to `out`
    pub(crate) fn encode_hex(&self, text: &str, out: &mut String) {
        use std::fmt::Write;
        for ch in text.chars() {
            let byte = win_ansi_byte(ch).unwrap_or(b'?');
            // writing into a String cannot fail
            let _ = write!(out, "{byte:02x}");
        }
    }
}
