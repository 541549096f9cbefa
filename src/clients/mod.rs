//! Type-safe wrappers around [`TableClient`](table_actor::TableClient).
//!
//! Each client implements [`TableAccess`](table_actor::TableAccess) for the shared reads and
//! deletes and adds the table-specific writes.

pub mod group_client;
pub mod order_client;
pub mod product_client;
pub mod store_client;

pub use group_client::*;
pub use order_client::*;
pub use product_client::*;
pub use store_client::*;
