//! Error types for the pageprofile library.

use std::io;
use thiserror::Error;

/// Result type alias for pageprofile operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during page analysis.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The token source could not produce a page.
    ///
    /// Raised before any profile building starts; analysis never sees a
    /// partially extracted page.
    #[error("Token source error: {0}")]
    Source(String),

    /// The document sink rejected rendered content.
    #[error("Document sink error: {0}")]
    Sink(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// The token source reported a non-positive page width.
    #[error("Invalid page width: {0}")]
    InvalidPageWidth(f32),

    /// Error serializing the decision report.
    #[error("Report serialization error: {0}")]
    Report(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
