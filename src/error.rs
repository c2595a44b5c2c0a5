use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum ReceiptError {
    #[error(transparent)]
    /// An I/O error occurred while delivering the document
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error("a page in the page order is not in the document")]
    PageMissing,

    #[error("the {0} field is required")]
    MissingField(&'static str),

    #[error("{0:?} is not a complete CPF (11 digits)")]
    InvalidCpf(String),

    #[error("{day} is not a valid day of {month} {year}")]
    InvalidDate { day: u8, month: String, year: i32 },

    #[error("{0:?} is not a month name")]
    InvalidMonth(String),
}
