//! Error types for the products table.

use crate::store_table::StoreError;
use thiserror::Error;

/// Errors that can occur during menu operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested menu item was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The store already has an item with this name.
    #[error("Product already exists: {0}")]
    AlreadyExists(String),

    /// The owning store does not exist.
    #[error("Store not found: {0}")]
    MissingStore(String),

    /// The menu item data provided is invalid.
    #[error("Product validation error: {0}")]
    ValidationError(String),

    /// Looking up the owning store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An error occurred while communicating with the table.
    #[error("Table communication error: {0}")]
    TableCommunication(String),
}

impl From<table_actor::TableError> for ProductError {
    fn from(e: table_actor::TableError) -> Self {
        use table_actor::TableError;
        match e {
            TableError::NotFound(id) => ProductError::NotFound(id),
            TableError::Conflict(key) => ProductError::AlreadyExists(key),
            TableError::RowError(inner) => match inner.downcast::<ProductError>() {
                Ok(product_error) => *product_error,
                Err(other) => ProductError::TableCommunication(other.to_string()),
            },
            other => ProductError::TableCommunication(other.to_string()),
        }
    }
}
