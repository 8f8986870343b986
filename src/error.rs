//! Error types for the glyph-pager library

use thiserror::Error;

/// Result type alias using PaginationError
pub type Result<T> = std::result::Result<T, PaginationError>;

/// Errors that can occur when loading metrics or paginating text
#[derive(Debug, Error)]
pub enum PaginationError {
    /// Error reading a glyph metrics table
    #[error("I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a CSV glyph metrics table
    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    /// A glyph metrics record is malformed
    #[error("Invalid glyph metrics: {0}")]
    MetricsError(String),

    /// Font data could not be parsed
    #[error("Font loading failed: {0}")]
    FontError(String),

    /// Page geometry cannot hold any text
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),

    /// Invalid pagination option
    #[error("Invalid pagination option: {0}")]
    InvalidOption(String),
}
