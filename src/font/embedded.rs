use crate::{
    refs::{ObjectReferences, RefType},
    Pt, ReceiptError,
};
use owned_ttf_parser::{AsFaceRef, Face, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Name, Pdf, Str,
};
use std::collections::BTreeMap;
use std::fmt::Write;

/// A TrueType / OpenType font embedded in its entirety into the generated PDF.
/// Use this when the receipt needs glyphs outside WinAnsiEncoding or a
/// specific typeface; text is written as glyph ids (Identity-H).
pub struct EmbeddedFont {
    face: OwnedFace,
}

impl EmbeddedFont {
    /// Parse a font from raw bytes
    pub fn load(bytes: Vec<u8>) -> Result<EmbeddedFont, ReceiptError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(EmbeddedFont { face })
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face().units_per_em() as f32
    }

    /// Glyph for `ch`, falling back to the replacement character, then `?`,
    /// then `.notdef`
    pub fn glyph_id(&self, ch: char) -> u16 {
        let face = self.face();
        face.glyph_index(ch)
            .or_else(|| face.glyph_index('\u{FFFD}'))
            .or_else(|| face.glyph_index('?'))
            .map(|gid| gid.0)
            .unwrap_or(0)
    }

    /// Sum of the glyph advances of `text` at `size`
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        let face = self.face();
        let units: f32 = text
            .chars()
            .map(|ch| {
                face.glyph_hor_advance(owned_ttf_parser::GlyphId(self.glyph_id(ch)))
                    .unwrap_or_default() as f32
            })
            .sum();
        self.scaling(size) * units
    }

    /// Height above the baseline at `size`
    pub fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().ascender() as f32
    }

    /// Depth below the baseline at `size`, negative
    pub fn descent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().descender() as f32
    }

    pub fn leading(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().line_gap() as f32
    }

    /// PostScript-friendly name of the face, or `Embedded` when it has none
    fn name(&self) -> String {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode())
            .and_then(|name| name.to_string())
            .map(|name| name.replace(' ', ""))
            .unwrap_or_else(|| "Embedded".to_string())
    }

    /// Every glyph reachable from a unicode cmap, with one character it maps from
    fn glyph_map(&self) -> BTreeMap<u16, char> {
        let mut map = BTreeMap::new();
        let Some(cmap) = self.face().tables().cmap else {
            return map;
        };
        for subtable in cmap.subtables.into_iter().filter(|t| t.is_unicode()) {
            subtable.codepoints(|codepoint| {
                let glyph = subtable.glyph_index(codepoint).filter(|g| g.0 > 0);
                if let (Some(glyph), Ok(ch)) = (glyph, char::try_from(codepoint)) {
                    map.entry(glyph.0).or_insert(ch);
                }
            });
        }
        map
    }

    pub(crate) fn encode_hex(&self, text: &str, out: &mut String) {
        for ch in text.chars() {
            // writing into a String cannot fail
            let _ = write!(out, "{:04x}", self.glyph_id(ch));
        }
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, pdf: &mut Pdf) {
        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = refs.gen(RefType::CidFont(font_index));
        let descriptor_id = refs.gen(RefType::FontDescriptor(font_index));
        let data_id = refs.gen(RefType::FontData(font_index));
        let to_unicode_id = refs.gen(RefType::ToUnicode(font_index));

        let base_name = self.name();
        let glyphs = self.glyph_map();
        let face = self.face();
        let per_mille = 1000.0 / face.units_per_em() as f32;

        let mut type0 = pdf.type0_font(font_id);
        type0.base_font(Name(base_name.as_bytes()));
        type0.encoding_predefined(Name(b"Identity-H"));
        type0.descendant_font(cid_font_id);
        type0.to_unicode(to_unicode_id);
        drop(type0);

        let mut cid = pdf.cid_font(cid_font_id);
        cid.subtype(CidFontType::Type2);
        cid.base_font(Name(base_name.as_bytes()));
        cid.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid.font_descriptor(descriptor_id);
        cid.cid_to_gid_map_predefined(Name(b"Identity"));
        let mut widths = cid.widths();
        for run in consecutive_runs(glyphs.keys().copied()) {
            let start = run[0];
            widths.consecutive(
                start,
                run.iter().map(|&gid| {
                    face.glyph_hor_advance(owned_ttf_parser::GlyphId(gid))
                        .unwrap_or_default() as f32
                        * per_mille
                }),
            );
        }
        drop(widths);
        drop(cid);

        let bbox = face.global_bounding_box();
        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags |= FontFlags::FIXED_PITCH;
        }
        if face.is_italic() {
            flags |= FontFlags::ITALIC;
        }
        let mut descriptor = pdf.font_descriptor(descriptor_id);
        descriptor.name(Name(base_name.as_bytes()));
        descriptor.flags(flags);
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * per_mille,
            y1: bbox.y_min as f32 * per_mille,
            x2: bbox.x_max as f32 * per_mille,
            y2: bbox.y_max as f32 * per_mille,
        });
        descriptor.italic_angle(0.0);
        descriptor.ascent(face.ascender() as f32 * per_mille);
        descriptor.descent(face.descender() as f32 * per_mille);
        descriptor.cap_height(
            face.capital_height()
                .unwrap_or_else(|| face.ascender()) as f32
                * per_mille,
        );
        descriptor.stem_v(80.0);
        descriptor.font_file2(data_id);
        drop(descriptor);

        let data = self.face.as_slice();
        pdf.stream(data_id, data)
            .pair(Name(b"Length1"), data.len() as i32);

        let cmap = to_unicode_cmap(&glyphs);
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(cmap.as_bytes(), 6);
        pdf.stream(to_unicode_id, &compressed)
            .filter(Filter::FlateDecode);
    }
}

/// Splits sorted glyph ids into runs of consecutive ids
fn consecutive_runs(ids: impl Iterator<Item = u16>) -> Vec<Vec<u16>> {
    let mut runs: Vec<Vec<u16>> = Vec::new();
    for id in ids {
        match runs.last_mut() {
            Some(run) if run.last().map(|&last| last + 1) == Some(id) => run.push(id),
            _ => runs.push(vec![id]),
        }
    }
    runs
}

/// Builds a ToUnicode CMap. `bfchar` blocks may hold at most 100 entries.
fn to_unicode_cmap(glyphs: &BTreeMap<u16, char>) -> String {
    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    let entries: Vec<(&u16, &char)> = glyphs.iter().collect();
    for block in entries.chunks(100) {
        let _ = writeln!(cmap, "{} beginbfchar", block.len());
        for (gid, ch) in block {
            let mut utf16 = [0u16; 2];
            let units: String = ch
                .encode_utf16(&mut utf16)
                .iter()
                .map(|unit| format!("{unit:04x}"))
                .collect();
            let _ = writeln!(cmap, "<{gid:04x}> <{units}>");
        }
        cmap.push_str("endbfchar\n");
    }

    cmap.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");
    cmap
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::testing::{glyph_of, tiny_truetype, ADVANCE};
    use crate::font::{Font, FontFamily};
    use crate::page::{SpanFont, SpanLayout};
    use crate::{pagesize, Document, Page};

    #[test]
    fn loads_and_measures_a_truetype_face() {
        let font = EmbeddedFont::load(tiny_truetype()).expect("face parses");
        assert_eq!(font.glyph_id('A'), glyph_of('A'));
        // no glyph for it, and no replacement glyph either: falls back to '?'
        assert_eq!(font.glyph_id('→'), glyph_of('?'));
        let close = |a: Pt, b: f32| (a.0 - b).abs() < 1e-3;
        assert!(close(font.width_of_text("AB", Pt(10.0)), 2.0 * ADVANCE as f32 / 100.0));
        assert!(close(font.ascent(Pt(10.0)), 8.0));
        assert!(close(font.descent(Pt(10.0)), -2.0));
        assert_eq!(font.name(), "Embedded");
    }

    #[test]
    fn glyph_map_covers_the_cmap() {
        let font = EmbeddedFont::load(tiny_truetype()).expect("face parses");
        let glyphs = font.glyph_map();
        assert_eq!(glyphs.len(), 95);
        assert_eq!(glyphs.get(&glyph_of('R')), Some(&'R'));
    }

    #[test]
    fn text_is_written_as_glyph_ids() {
        let font = EmbeddedFont::load(tiny_truetype()).expect("face parses");
        let mut hex = String::new();
        font.encode_hex("AB", &mut hex);
        assert_eq!(hex, format!("{:04x}{:04x}", glyph_of('A'), glyph_of('B')));
    }

    #[test]
    fn embeds_the_face_into_a_document() {
        let mut doc = Document::default();
        let family: FontFamily = doc.add_family(
            Font::load(tiny_truetype()).expect("face parses"),
            Font::load(tiny_truetype()).expect("face parses"),
        );
        let mut page = Page::new(pagesize::A5, None);
        page.add_span(SpanLayout {
            text: "RECIBO".into(),
            font: SpanFont {
                id: family.bold,
                size: Pt(16.0),
            },
            coords: (Pt(36.0), Pt(500.0)),
        });
        doc.add_page(page);

        let bytes = doc.to_bytes().expect("document renders");
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Type0"));
        assert!(text.contains("/CIDFontType2"));
        assert!(text.contains("/Identity-H"));
        assert!(text.contains("/FontFile2"));
        assert!(text.contains("/ToUnicode"));
        assert!(text.contains("/FlateDecode"));
        assert!(text.contains(&format!("<{:04x}", glyph_of('R'))));
    }

    #[test]
    fn garbage_is_not_a_font() {
        let err = EmbeddedFont::load(b"definitely not a font".to_vec());
        assert!(matches!(err, Err(ReceiptError::FaceParsing(_))));
    }

    #[test]
    fn glyph_ids_group_into_runs() {
        let runs = consecutive_runs([1u16, 2, 3, 7, 8, 10].into_iter());
        assert_eq!(runs, vec![vec![1, 2, 3], vec![7, 8], vec![10]]);
    }

    #[test]
    fn cmap_blocks_are_capped() {
        let glyphs: BTreeMap<u16, char> = (1u16..=150)
            .map(|gid| (gid, char::from_u32(0x40 + gid as u32).unwrap_or('?')))
            .collect();
        let cmap = to_unicode_cmap(&glyphs);
        assert!(cmap.contains("100 beginbfchar"));
        assert!(cmap.contains("50 beginbfchar"));
        assert!(cmap.contains("<0001> <0041>"));
    }
}
