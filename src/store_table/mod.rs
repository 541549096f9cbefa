//! # Stores Table
//!
//! Restaurants, unique by name.
//!
//! ## Structure
//!
//! - [`entity`] - [`TableRow`](table_actor::TableRow) implementation for [`Store`]
//! - [`error`] - [`StoreError`]
//! - [`new()`] - Factory function that creates the table and its client
//!
//! Stores have no dependencies (`Context = ()`). Deleting a store does not cascade here; the
//! admin console removes its products and groups first.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::StoreClient;
use crate::model::Store;
use table_actor::TableActor;

/// Creates a new stores table and its client.
pub fn new(buffer_size: usize) -> (TableActor<Store>, StoreClient) {
    let (actor, generic_client) = TableActor::new(buffer_size);
    (actor, StoreClient::new(generic_client))
}
