use crate::content::render_spans;
use crate::font::Font;
use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use crate::ReceiptError;
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Name, Pdf};

/// Which font, at which size, a span is set in
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    /// Font in the document's arena
    pub id: Id<Font>,
    pub size: Pt,
}

/// A run of text placed on a page, `coords` being the start of its baseline
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub coords: (Pt, Pt),
}

/// A single page of a document
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// The laid out text, in drawing order
    pub spans: Vec<SpanLayout>,
}

impl Page {
    /// Create a new page with the given size. When margins are given, the
    /// content box is inset by them; otherwise it covers the whole page.
    pub fn new(size: PageSize, margins: Option<Margins>) -> Page {
        let (width, height) = size;
        let margins = margins.unwrap_or_default();
        Page {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: width,
                y2: height,
            },
            content_box: Rect {
                x1: margins.left,
                y1: margins.bottom,
                x2: width - margins.right,
                y2: height - margins.top,
            },
            spans: Vec::new(),
        }
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.spans.push(span);
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        writer: &mut Pdf,
    ) -> Result<(), ReceiptError> {
        let id = refs.gen(RefType::Page(page_index));
        let page_tree_id = refs.gen(RefType::PageTree);
        let content_id = refs.gen(RefType::ContentForPage(page_index));
        let font_refs: Vec<(usize, pdf_writer::Ref)> = fonts
            .iter()
            .map(|(font_id, _)| {
                let index = font_id.index();
                (index, refs.gen(RefType::Font(index)))
            })
            .collect();

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(page_tree_id);
        page.contents(content_id);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (index, font_ref) in font_refs {
            resource_fonts.pair(Name(format!("F{index}").as_bytes()), font_ref);
        }
        resource_fonts.finish();
        resources.finish();
        page.finish();

        let rendered = render_spans(&self.spans, fonts)?;
        writer.stream(content_id, rendered.as_slice());
        Ok(())
    }
}
