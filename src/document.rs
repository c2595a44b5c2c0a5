use crate::{
    font::{FamilyMeasurer, Font, FontFamily},
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
    ReceiptError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Pdf, Ref};
use std::io::Write;

#[derive(Default)]
/// A document is the main object that stores all the contents of the PDF
/// then renders it out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: Arena<Font>,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    /// Add a font to the document. Fonts are shared by every page and referred
    /// to by the returned id.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Adds a regular / bold pair of fonts
    pub fn add_family(&mut self, regular: Font, bold: Font) -> FontFamily {
        FontFamily {
            regular: self.add_font(regular),
            bold: self.add_font(bold),
        }
    }

    /// Adds the standard Helvetica regular / bold pair
    pub fn add_helvetica(&mut self) -> FontFamily {
        self.add_family(Font::helvetica(), Font::helvetica_bold())
    }

    /// A [TextMeasurer](crate::TextMeasurer) over this document's fonts
    pub fn measurer(&self, family: FontFamily) -> FamilyMeasurer<'_> {
        FamilyMeasurer::new(&self.fonts, family)
    }

    /// Render the whole document into memory and write it out. Nothing is
    /// resolved into PDF objects until this is called.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), ReceiptError> {
        let bytes = self.to_bytes()?;
        w.write_all(&bytes)?;
        Ok(())
    }

    /// Render the whole document to PDF bytes
    pub fn to_bytes(self) -> Result<Vec<u8>, ReceiptError> {
        let Document {
            info,
            pages,
            page_order,
            fonts,
        } = self;

        log::debug!(
            "writing document with {} page(s) and {} font(s)",
            page_order.len(),
            fonts.len()
        );

        let mut refs = ObjectReferences::new();
        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..page_order.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in fonts.iter() {
            font.write(&mut refs, id, &mut writer);
        }

        for (page_index, id) in page_order.iter().enumerate() {
            let page = pages.get(*id).ok_or(ReceiptError::PageMissing)?;
            page.write(&mut refs, page_index, &fonts, &mut writer)?;
        }

        writer.catalog(catalog_id).pages(page_tree_id);

        Ok(writer.finish())
    }
}
