//! Application-level errors.
//!
//! Every table, auth, storage and import error converts into [`AppError`] with `?`, so page and
//! console operations return a single error type.

use crate::auth::AuthError;
use crate::group_table::GroupError;
use crate::import::ImportError;
use crate::order_table::OrderError;
use crate::product_table::ProductError;
use crate::storage::StorageError;
use crate::store_table::StoreError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AppError {
    /// Input was rejected before anything was sent to a table.
    #[error("{0}")]
    Validation(String),

    #[error("Ordering for this group has closed")]
    Expired,

    #[error("No group selected")]
    NoActiveGroup,

    #[error("Name does not match the order")]
    NameMismatch,

    #[error("Admin sign-in required")]
    Unauthorized,

    #[error("Unknown group: {0}")]
    UnknownGroup(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Group(#[from] GroupError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Import(#[from] ImportError),
}

impl AppError {
    /// Message shown to the user when `action` fails.
    pub fn alert(&self, action: &str) -> String {
        format!("{} failed: {}", action, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_prefixes_action() {
        let err = AppError::from(ProductError::AlreadyExists("1/Tea".to_string()));
        assert_eq!(
            err.alert("Add item"),
            "Add item failed: Product already exists: 1/Tea"
        );
        assert_eq!(
            AppError::Expired.alert("Order"),
            "Order failed: Ordering for this group has closed"
        );
    }
}
