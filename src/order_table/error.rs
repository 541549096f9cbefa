//! Error types for the orders table.

use crate::group_table::GroupError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The group the order was placed in does not exist.
    #[error("Group not found: {0}")]
    MissingGroup(String),

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// Looking up the group failed.
    #[error(transparent)]
    Group(#[from] GroupError),

    /// An error occurred while communicating with the table.
    #[error("Table communication error: {0}")]
    TableCommunication(String),
}

impl From<table_actor::TableError> for OrderError {
    fn from(e: table_actor::TableError) -> Self {
        use table_actor::TableError;
        match e {
            TableError::NotFound(id) => OrderError::NotFound(id),
            TableError::RowError(inner) => match inner.downcast::<OrderError>() {
                Ok(order_error) => *order_error,
                Err(other) => OrderError::TableCommunication(other.to_string()),
            },
            other => OrderError::TableCommunication(other.to_string()),
        }
    }
}
