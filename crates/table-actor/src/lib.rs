//! # Table Actor
//!
//! In-process row store built on the **Actor Model**. Each table is one Tokio task that owns every
//! row of one type and serves typed requests over a channel, the way a hosted database serves a
//! client SDK: insert, upsert on a conflict key, point reads, filtered selects, updates, point
//! deletes and filtered deletes. After every successful mutation the table publishes a [`Change`]
//! on a broadcast feed, so views can re-fetch when something they show has changed.
//!
//! ## Architecture Overview
//!
//! 1. **Row Layer** ([`TableRow`]) - the record, its payloads, its filter and its lifecycle hooks
//! 2. **Runtime Layer** ([`TableActor`]) - sequential request processing and the change feed
//! 3. **Interface Layer** ([`TableClient`]) - cloneable, type-safe request handle
//!
//! Domain clients wrap a [`TableClient`] and implement [`TableAccess`] to get the common reads and
//! deletes mapped into their own error type.
//!
//! ## Example
//!
//! ```rust
//! use table_actor::{ChangeKind, TableActor, TableRow, Upserted};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Item { id: u32, shop: u32, name: String, price: f64 }
//!
//! #[derive(Debug)] struct ItemCreate { shop: u32, name: String, price: f64 }
//! #[derive(Debug, thiserror::Error)] #[error("item error")] struct ItemError;
//!
//! #[async_trait]
//! impl TableRow for Item {
//!     type Id = u32;
//!     type Create = ItemCreate;
//!     type Update = ();
//!     type Filter = u32;
//!     type Context = ();
//!     type Error = ItemError;
//!
//!     fn from_create(id: u32, p: ItemCreate) -> Result<Self, ItemError> {
//!         Ok(Self { id, shop: p.shop, name: p.name, price: p.price })
//!     }
//!     fn id(&self) -> u32 { self.id }
//!     fn matches(&self, shop: &u32) -> bool { self.shop == *shop }
//!     fn unique_key(&self) -> Option<String> { Some(format!("{}/{}", self.shop, self.name)) }
//!     fn create_key(p: &ItemCreate) -> Option<String> { Some(format!("{}/{}", p.shop, p.name)) }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), ItemError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = TableActor::<Item>::new(10);
//!     let mut changes = client.subscribe();
//!     tokio::spawn(actor.run(()));
//!
//!     let first = client.upsert(ItemCreate { shop: 1, name: "Tea".into(), price: 30.0 }).await.unwrap();
//!     let again = client.upsert(ItemCreate { shop: 1, name: "Tea".into(), price: 35.0 }).await.unwrap();
//!     assert_eq!(first, Upserted::Inserted(1));
//!     assert_eq!(again, Upserted::Updated(1));
//!
//!     assert_eq!(client.select(1).await.unwrap()[0].price, 35.0);
//!     assert_eq!(changes.recv().await.unwrap().kind, ChangeKind::Inserted);
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockTable`] answers requests from scripted expectations, for testing code that calls a
//! table without running one.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod row;

pub use actor::{TableActor, CHANGE_FEED_CAPACITY};
pub use client::TableClient;
pub use client_trait::TableAccess;
pub use error::TableError;
pub use message::{Change, ChangeKind, Response, TableRequest, Upserted};
pub use row::TableRow;
