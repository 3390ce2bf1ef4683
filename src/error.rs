//! Error types for the excelexport library

use thiserror::Error;

/// Result type alias for export operations
pub type Result<T> = std::result::Result<T, ExportError>;

/// Boxed error returned by query-executor implementations; the concrete
/// failure is opaque to this crate.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for all export operations
#[derive(Error, Debug)]
pub enum ExportError {
    /// A sheet could not be created or removed
    #[error("Sheet '{sheet}' operation failed: {reason}")]
    Sheet { sheet: String, reason: String },

    /// A definition's query failed; nothing was serialized
    #[error("Query for sheet '{sheet}' failed: {source}")]
    Query {
        sheet: String,
        #[source]
        source: BoxError,
    },

    /// Workbook serialization failed
    #[error("Failed to serialize workbook: {0}")]
    Xlsx(#[from] umya_spreadsheet::XlsxError),

    /// Sink write failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
