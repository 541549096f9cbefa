//! Error types for the stores table.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// The requested store was not found.
    #[error("Store not found: {0}")]
    NotFound(String),

    /// Another store already uses this name.
    #[error("Store already exists: {0}")]
    AlreadyExists(String),

    /// The store data provided is invalid.
    #[error("Store validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the table.
    #[error("Table communication error: {0}")]
    TableCommunication(String),
}

impl From<table_actor::TableError> for StoreError {
    fn from(e: table_actor::TableError) -> Self {
        use table_actor::TableError;
        match e {
            TableError::NotFound(id) => StoreError::NotFound(id),
            TableError::Conflict(key) => StoreError::AlreadyExists(key),
            TableError::RowError(inner) => match inner.downcast::<StoreError>() {
                Ok(store_error) => *store_error,
                Err(other) => StoreError::TableCommunication(other.to_string()),
            },
            other => StoreError::TableCommunication(other.to_string()),
        }
    }
}
