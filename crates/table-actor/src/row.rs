//! # TableRow Trait
//!
//! The `TableRow` trait is the contract every persisted record (Store, Product, Group, Order, …) implements to
//! be served by the generic [`TableActor`](crate::TableActor). It names the row's id, its insert and update
//! payloads, the filter used by `select`/`delete_where`, the injected context and the error type, and it
//! provides the lifecycle hooks the actor calls around every mutation.
//!
//! # Conflict Targets
//! A table may declare a uniqueness constraint by returning a key from [`TableRow::unique_key`] and
//! [`TableRow::create_key`]. The actor uses that key in two places:
//! - **Insert** refuses a payload whose key is already taken (`TableError::Conflict`).
//! - **Upsert** merges the payload into the existing row instead of inserting a second one.
//!
//! Rows without a constraint keep the defaults (`None`), in which case upsert degrades to insert.
//!
//! # Provided Methods (Hooks)
//! - [`TableRow::on_create`]
//! - [`TableRow::on_delete`]
//! - [`TableRow::merge`]
//!
//! The defaults do nothing (or rebuild the row from the payload, for `merge`).

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any record must implement to be stored in a [`TableActor`](crate::TableActor).
///
/// # Async & Context
/// The hooks are `#[async_trait]` so that they can call other tables (e.g. an order checking that its
/// group exists). The `Context` is handed to `run()` rather than `new()`, so tables can be wired together
/// after every actor has been constructed.
#[async_trait]
pub trait TableRow: Clone + Send + Sync + 'static {
    /// Primary key. Generated by the table from a sequential `u32`; ordered so that
    /// `select` returns rows in ascending id order.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32> + 'static;

    /// Insert payload.
    type Create: Send + Sync + Debug + 'static;

    /// Partial update payload. Use `()` for rows that never change after insert.
    type Update: Send + Sync + Debug + 'static;

    /// Predicate used by `select` and `delete_where`.
    type Filter: Send + Sync + Debug + 'static;

    /// Dependencies injected into every hook. Use `()` if none are needed.
    type Context: Send + Sync + 'static;

    /// Row-level error. Boxed into [`TableError::RowError`](crate::TableError::RowError) by the actor.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the full row from its generated id and the insert payload.
    fn from_create(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// The row's primary key.
    fn id(&self) -> Self::Id;

    /// Whether this row is selected by `filter`.
    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Conflict key of a stored row.
    fn unique_key(&self) -> Option<String> {
        None
    }

    /// Conflict key an insert payload would occupy.
    fn create_key(_params: &Self::Create) -> Option<String> {
        None
    }

    /// Apply an upsert payload to the row that already holds its conflict key.
    fn merge(&mut self, params: Self::Create) -> Result<(), Self::Error> {
        *self = Self::from_create(self.id(), params)?;
        Ok(())
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after the row is built and before it is stored. Failing here aborts the insert.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called with the update payload; the row mutates itself.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the row is removed. Failing here keeps the row.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
