//! # Table Errors
//!
//! Errors raised by the table framework itself. Row-specific failures coming out of the
//! [`TableRow`](crate::TableRow) hooks are carried opaquely in [`TableError::RowError`].

/// Errors that can occur while talking to a table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Table closed")]
    TableClosed,
    #[error("Table dropped response channel")]
    TableDropped,
    #[error("Row not found: {0}")]
    NotFound(String),
    #[error("Duplicate key: {0}")]
    Conflict(String),
    #[error("{0}")]
    RowError(Box<dyn std::error::Error + Send + Sync>),
}
