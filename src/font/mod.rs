//! Fonts, and the measuring side of text layout.
//!
//! A [`Font`] is stored "globally" in a [`Document`](crate::Document) arena and
//! referred to by its [`Id`]. Layout never touches fonts directly: it asks a
//! [`TextMeasurer`] how wide a piece of text is in a given [`Style`].
//! [`FamilyMeasurer`] answers that question from the document's fonts.

mod embedded;
mod standard;

#[cfg(test)]
pub(crate) mod testing;

pub use embedded::*;
pub use standard::*;

use crate::refs::{ObjectReferences, RefType};
use crate::{Pt, ReceiptError};
use id_arena::{Arena, Id};
use pdf_writer::{Name, Pdf};

/// Weight a piece of text is set in
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Style {
    #[default]
    Normal,
    Bold,
}

/// Gives the rendered width of text. Implementations must be deterministic:
/// the same text, style and size always measure the same.
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: Style, size: Pt) -> Pt;
}

/// A font usable in a document: either one of the standard PDF fonts or an
/// embedded TrueType font
pub enum Font {
    Standard(StandardFont),
    Embedded(EmbeddedFont),
}

impl Font {
    /// Standard Helvetica, never embedded
    pub fn helvetica() -> Font {
        Font::Standard(StandardFont::Helvetica)
    }

    /// Standard Helvetica-Bold, never embedded
    pub fn helvetica_bold() -> Font {
        Font::Standard(StandardFont::HelveticaBold)
    }

    /// Load a TrueType / OpenType font from raw bytes, returning an error if it
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, ReceiptError> {
        Ok(Font::Embedded(EmbeddedFont::load(bytes)?))
    }

    /// Width of `text` set at `size`
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        match self {
            Font::Standard(font) => {
                let units: u32 = text.chars().map(|ch| font.advance(ch) as u32).sum();
                size * (units as f32 / font.units_per_em() as f32)
            }
            Font::Embedded(font) => font.width_of_text(text, size),
        }
    }

    /// Distance from the baseline to the top of the font
    pub fn ascent(&self, size: Pt) -> Pt {
        match self {
            Font::Standard(font) => size * (font.ascender() as f32 / font.units_per_em() as f32),
            Font::Embedded(font) => font.ascent(size),
        }
    }

    /// Distance from the baseline to the bottom of the font; usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        match self {
            Font::Standard(font) => size * (font.descender() as f32 / font.units_per_em() as f32),
            Font::Embedded(font) => font.descent(size),
        }
    }

    /// How far apart two consecutive baselines sit by default
    pub fn line_height(&self, size: Pt) -> Pt {
        let leading = match self {
            Font::Standard(font) => size * (font.line_gap() as f32 / font.units_per_em() as f32),
            Font::Embedded(font) => font.leading(size),
        };
        leading + self.ascent(size) - self.descent(size)
    }

    /// Hex string body (without the angle brackets) that draws `text`
    pub(crate) fn encode_hex(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() * 4);
        match self {
            Font::Standard(font) => font.encode_hex(text, &mut out),
            Font::Embedded(font) => font.encode_hex(text, &mut out),
        }
        out
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, pdf: &mut Pdf) {
        let font_index = id.index();
        match self {
            Font::Standard(font) => {
                let font_id = refs.gen(RefType::Font(font_index));
                pdf.type1_font(font_id)
                    .base_font(Name(font.base_font()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
            }
            Font::Embedded(font) => font.write(refs, font_index, pdf),
        }
    }
}

/// Which font sets each [`Style`]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FontFamily {
    /// Sets [`Style::Normal`] text
    pub regular: Id<Font>,
    /// Sets [`Style::Bold`] text
    pub bold: Id<Font>,
}

impl FontFamily {
    /// The font for `style`
    pub fn font(&self, style: Style) -> Id<Font> {
        match style {
            Style::Normal => self.regular,
            Style::Bold => self.bold,
        }
    }
}

/// Measures text with the fonts of a [`FontFamily`]
pub struct FamilyMeasurer<'a> {
    fonts: &'a Arena<Font>,
    family: FontFamily,
}

impl<'a> FamilyMeasurer<'a> {
    pub fn new(fonts: &'a Arena<Font>, family: FontFamily) -> FamilyMeasurer<'a> {
        FamilyMeasurer { fonts, family }
    }
}

impl TextMeasurer for FamilyMeasurer<'_> {
    fn measure(&self, text: &str, style: Style, size: Pt) -> Pt {
        self.fonts[self.family.font(style)].width_of_text(text, size)
    }
}
