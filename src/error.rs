use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum PDFError {
    #[error("invalid layout configuration: {parameter} must be positive, got {value}")]
    /// A width or line height handed to the layout engine was zero, negative, or NaN
    InvalidLayoutConfig { parameter: &'static str, value: f32 },

    #[error("font `{0}` has not been registered")]
    /// A font identifier was used before being registered
    UnknownFont(String),

    #[error("could not load font `{font}` from any of {attempts} source(s)")]
    /// Every source in a font's fallback chain failed to load
    FontLoad { font: String, attempts: usize },

    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error("page is missing from the document")]
    /// The document's page order refers to a page that doesn't exist
    PageMissing,
}

pub type Result<T> = std::result::Result<T, PDFError>;

/// Reject zero, negative, and NaN lengths before any layout work starts
pub(crate) fn ensure_positive(parameter: &'static str, value: crate::Pt) -> Result<()> {
    if value.is_positive() {
        Ok(())
    } else {
        Err(PDFError::InvalidLayoutConfig {
            parameter,
            value: value.0,
        })
    }
}
