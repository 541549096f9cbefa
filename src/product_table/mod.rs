//! # Products Table
//!
//! Menu items, unique per store by name.
//!
//! ## Structure
//!
//! - [`entity`] - [`TableRow`](table_actor::TableRow) implementation for [`Product`]
//! - [`error`] - [`ProductError`]
//! - [`new()`] - Factory function that creates the table and its client
//!
//! The table's context is a [`StoreClient`]: inserts fail with
//! [`ProductError::MissingStore`] when the store is gone.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use table_actor::TableActor;

/// Creates a new products table and its client.
///
/// Start it with `actor.run(store_client)`.
pub fn new(buffer_size: usize) -> (TableActor<Product>, ProductClient) {
    let (actor, generic_client) = TableActor::new(buffer_size);
    (actor, ProductClient::new(generic_client))
}
