//! Rich-text line breaking.
//!
//! Text comes in as [`Segment`]s (styled runs, optionally tied into an atomic
//! group) and goes through three pure steps:
//!
//! 1. [`tokenize`] splits segments into words and space runs,
//! 2. [`pair_connectors`] glues short connector words ("da", "no", ...) to the
//!    word after them so a line never ends on one,
//! 3. [`break_lines`] greedily fills lines, keeping groups whole.
//!
//! [`layout_segments`] runs all three. The resulting [`LayoutResult`] is then
//! drawn with [`render_layout`] onto any [`Renderer`], such as a
//! [`PageRenderer`].
//!
//! # Example
//!
//! ```
//! use receipt_pdf::{Document, Page, Pt, pagesize};
//! use receipt_pdf::layout::{
//!     layout_segments, render_layout, BreakOptions, GroupId, Margins, PageRenderer,
//!     RenderOptions, Segment,
//! };
//!
//! let mut doc = Document::default();
//! let family = doc.add_helvetica();
//! let mut page = Page::new(pagesize::A4, Some(Margins::all(Pt(72.0))));
//! let width = page.content_box.width();
//!
//! let cpf = GroupId::named("cpf");
//! let segments = vec![
//!     Segment::normal("Recebi de "),
//!     Segment::bold("MARIA DA SILVA"),
//!     Segment::normal(", "),
//!     Segment::normal("CPF.: ").in_group(cpf.clone()),
//!     Segment::bold("123.456.789-00").in_group(cpf.clone()),
//!     Segment::normal(", ").in_group(cpf.clone()),
//!     Segment::normal("o valor de "),
//!     Segment::bold("R$ 100,00"),
//!     Segment::normal("."),
//! ];
//!
//! let mut options = BreakOptions::new(width, Pt(12.0));
//! options.primary_group(cpf);
//! let layout = layout_segments(&segments, &doc.measurer(family), &options);
//!
//! let origin = (page.content_box.x1, page.content_box.y2 - Pt(12.0));
//! let mut render = RenderOptions::new(origin, Pt(18.0), width);
//! render.center_first_line_if_wrapped(true);
//! render_layout(&layout, &mut PageRenderer::new(&mut page, family, Pt(12.0)), &render);
//!
//! doc.add_page(page);
//! let pdf = doc.to_bytes().expect("document renders");
//! assert!(pdf.starts_with(b"%PDF"));
//! ```

mod breaker;
mod margins;
mod orphans;
mod render;
mod segment;

#[cfg(test)]
pub(crate) mod testing;

pub use breaker::*;
pub use margins::*;
pub use orphans::*;
pub use render::*;
pub use segment::*;
