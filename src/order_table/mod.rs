//! # Orders Table
//!
//! Line items placed in a group.
//!
//! ## Structure
//!
//! - [`entity`] - [`TableRow`](table_actor::TableRow) implementation for [`Order`]
//! - [`error`] - [`OrderError`]
//! - [`new()`] - Factory function that creates the table and its client
//!
//! ## Dependencies
//!
//! The table's context is a [`GroupClient`](crate::clients::GroupClient). `Order::on_create`
//! looks the group up and refuses the insert when it is gone, which is the only referential
//! check orders get. Removing a group's orders when the group closes is up to the caller.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use table_actor::TableActor;

/// Creates a new orders table and its client.
///
/// Start it with `actor.run(group_client)`.
pub fn new(buffer_size: usize) -> (TableActor<Order>, OrderClient) {
    let (actor, generic_client) = TableActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
