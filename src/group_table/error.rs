//! Error types for the groups table.

use crate::store_table::StoreError;
use thiserror::Error;

/// Errors that can occur during group operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GroupError {
    /// The requested group was not found.
    #[error("Group not found: {0}")]
    NotFound(String),

    /// The store the group was opened for does not exist.
    #[error("Store not found: {0}")]
    MissingStore(String),

    /// Looking up the store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An error occurred while communicating with the table.
    #[error("Table communication error: {0}")]
    TableCommunication(String),
}

impl From<table_actor::TableError> for GroupError {
    fn from(e: table_actor::TableError) -> Self {
        use table_actor::TableError;
        match e {
            TableError::NotFound(id) => GroupError::NotFound(id),
            TableError::RowError(inner) => match inner.downcast::<GroupError>() {
                Ok(group_error) => *group_error,
                Err(other) => GroupError::TableCommunication(other.to_string()),
            },
            other => GroupError::TableCommunication(other.to_string()),
        }
    }
}
