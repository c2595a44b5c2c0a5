mod content;

mod document;
pub use document::*;

/// Fonts and text measurement
pub mod font;
pub use font::{FamilyMeasurer, Font, FontFamily, Style, TextMeasurer};

mod info;
pub use info::*;

/// Utility functions and structures to layout objects (most text) on pages
pub mod layout;

mod latin;

mod page;
pub use page::*;

/// Common page sizes
pub mod pagesize;

/// Receipt forms and their one page PDF
pub mod receipt;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality, mostly for custom [pdf_writer::Content] generation
pub use pdf_writer;
