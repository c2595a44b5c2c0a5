//! Content stream generation for pages.

use crate::font::Font;
use crate::page::{SpanFont, SpanLayout};
use id_arena::Arena;
use std::io::Write;

/// Renders text spans to PDF content stream operators. The font is only
/// re-selected when it changes between spans.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_spans(
    spans: &[SpanLayout],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, std::io::Error> {
    let mut content: Vec<u8> = Vec::default();
    let Some(first) = spans.first() else {
        return Ok(content);
    };

    write!(&mut content, "q\n")?;
    write!(&mut content, "0 g\n")?;

    let mut current_font: SpanFont = first.font;
    write_font(&mut content, current_font)?;

    for span in spans.iter() {
        if span.text.is_empty() {
            continue;
        }
        if span.font != current_font {
            current_font = span.font;
            write_font(&mut content, current_font)?;
        }

        write!(&mut content, "BT\n")?;
        write!(&mut content, "{} {} Td\n", span.coords.0, span.coords.1)?;
        write!(
            &mut content,
            "<{}> Tj\n",
            fonts[current_font.id].encode_hex(&span.text)
        )?;
        write!(&mut content, "ET\n")?;
    }

    write!(&mut content, "Q\n")?;
    Ok(content)
}

fn write_font(content: &mut Vec<u8>, font: SpanFont) -> Result<(), std::io::Error> {
    writeln!(content, "/F{} {} Tf", font.id.index(), font.size)
}
