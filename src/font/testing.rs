//! A tiny TrueType face for exercising the embedded font path.
//!
//! The face maps printable ASCII (`' '..='~'`) to glyphs 1 to 95, every glyph
//! 500 units wide on a 1000 unit em. It has no outlines; viewers never see it.

pub(crate) const ADVANCE: u16 = 500;
const GLYPHS: u16 = 96;
const FIRST: u16 = 0x20;
const LAST: u16 = 0x7e;

/// Glyph id the tiny face gives to a printable ASCII character
pub(crate) fn glyph_of(ch: char) -> u16 {
    ch as u16 - FIRST + 1
}

pub(crate) fn tiny_truetype() -> Vec<u8> {
    let tables: [(&[u8; 4], Vec<u8>); 5] = [
        (b"cmap", cmap()),
        (b"head", head()),
        (b"hhea", hhea()),
        (b"hmtx", hmtx()),
        (b"maxp", maxp()),
    ];

    let mut font = Vec::new();
    put_u32(&mut font, 0x0001_0000);
    put_u16(&mut font, tables.len() as u16);
    put_u16(&mut font, 64); // searchRange
    put_u16(&mut font, 2); // entrySelector
    put_u16(&mut font, 16); // rangeShift

    let mut offset = 12 + 16 * tables.len();
    let mut body = Vec::new();
    for (tag, data) in tables.iter() {
        font.extend_from_slice(*tag);
        put_u32(&mut font, 0); // checksum, unchecked by parsers
        put_u32(&mut font, offset as u32);
        put_u32(&mut font, data.len() as u32);

        body.extend_from_slice(data);
        while body.len() % 4 != 0 {
            body.push(0);
        }
        offset = 12 + 16 * tables.len() + body.len();
    }
    font.extend_from_slice(&body);
    font
}

fn head() -> Vec<u8> {
    let mut t = Vec::new();
    put_u32(&mut t, 0x0001_0000); // version
    put_u32(&mut t, 0x0001_0000); // fontRevision
    put_u32(&mut t, 0); // checksumAdjustment
    put_u32(&mut t, 0x5f0f_3cf5); // magic
    put_u16(&mut t, 0); // flags
    put_u16(&mut t, 1000); // unitsPerEm
    t.extend_from_slice(&[0; 16]); // created, modified
    put_i16(&mut t, 0);
    put_i16(&mut t, -200);
    put_i16(&mut t, 1000);
    put_i16(&mut t, 800);
    put_u16(&mut t, 0); // macStyle
    put_u16(&mut t, 8); // lowestRecPPEM
    put_i16(&mut t, 2); // fontDirectionHint
    put_i16(&mut t, 0); // indexToLocFormat
    put_i16(&mut t, 0); // glyphDataFormat
    t
}

fn hhea() -> Vec<u8> {
    let mut t = Vec::new();
    put_u32(&mut t, 0x0001_0000);
    put_i16(&mut t, 800); // ascender
    put_i16(&mut t, -200); // descender
    put_i16(&mut t, 0); // lineGap
    put_u16(&mut t, ADVANCE); // advanceWidthMax
    t.extend_from_slice(&[0; 22]); // bearings, caret, reserved, metricDataFormat
    put_u16(&mut t, 1); // numberOfHMetrics
    t
}

fn maxp() -> Vec<u8> {
    let mut t = Vec::new();
    put_u32(&mut t, 0x0000_5000);
    put_u16(&mut t, GLYPHS);
    t
}

/// One full metric; the remaining glyphs repeat its advance
fn hmtx() -> Vec<u8> {
    let mut t = Vec::new();
    put_u16(&mut t, ADVANCE);
    put_i16(&mut t, 0);
    for _ in 1..GLYPHS {
        put_i16(&mut t, 0);
    }
    t
}

/// Windows unicode BMP cmap, format 4 with one real segment
fn cmap() -> Vec<u8> {
    let mut t = Vec::new();
    put_u16(&mut t, 0); // version
    put_u16(&mut t, 1); // numTables
    put_u16(&mut t, 3); // platform: windows
    put_u16(&mut t, 1); // encoding: unicode BMP
    put_u32(&mut t, 12); // subtable offset

    put_u16(&mut t, 4); // format
    put_u16(&mut t, 32); // length
    put_u16(&mut t, 0); // language
    put_u16(&mut t, 4); // segCountX2
    put_u16(&mut t, 4); // searchRange
    put_u16(&mut t, 1); // entrySelector
    put_u16(&mut t, 0); // rangeShift
    put_u16(&mut t, LAST); // endCode
    put_u16(&mut t, 0xffff);
    put_u16(&mut t, 0); // reservedPad
    put_u16(&mut t, FIRST); // startCode
    put_u16(&mut t, 0xffff);
    put_i16(&mut t, 1 - FIRST as i16); // idDelta
    put_i16(&mut t, 1);
    put_u16(&mut t, 0); // idRangeOffset
    put_u16(&mut t, 0);
    t
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn put_i16(out: &mut Vec<u8>, value: i16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}
