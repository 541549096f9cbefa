//! # Groups Table
//!
//! Order windows. The table's context is a [`StoreClient`](crate::clients::StoreClient) so that a
//! group cannot be opened for a store that does not exist.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::GroupClient;
use crate::model::Group;
use table_actor::TableActor;

/// Creates a new groups table and its client.
pub fn new(buffer_size: usize) -> (TableActor<Group>, GroupClient) {
    let (actor, generic_client) = TableActor::new(buffer_size);
    (actor, GroupClient::new(generic_client))
}
