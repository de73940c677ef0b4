//! Error types for the flipping book.
//!
//! Turning, ticking and hit testing never fail. Errors only come from the
//! edges: building a book, loading configuration or manifests, and export.

use thiserror::Error;

/// Result type alias using BookError.
pub type Result<T> = std::result::Result<T, BookError>;

/// Main error type for book construction, loading and export.
#[derive(Error, Debug)]
pub enum BookError {
    /// Failed to parse JSON data.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A book needs at least one page.
    #[error("Book has no pages")]
    EmptyBook,

    /// A page descriptor does not fit the book it was given to.
    #[error("Invalid page: {0}")]
    InvalidPage(String),

    /// A configuration value is out of its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to write formatted output.
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Failed to export a frame.
    #[error("Export error: {0}")]
    Export(String),
}
