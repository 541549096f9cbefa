//! # TableAccess Trait
//!
//! Common surface for domain clients (e.g. a `StoreClient`) that wrap a [`TableClient`] and speak
//! their own error type. Implementors provide `inner()` and `map_error()`; point reads, selects,
//! deletes and change subscriptions come for free.
use crate::{Change, TableClient, TableError, TableRow};
use async_trait::async_trait;
use tokio::sync::broadcast;

/// Trait for domain clients to inherit the standard table operations.
///
/// # Example
///
/// ```rust
/// use table_actor::{TableAccess, TableClient, TableError, TableRow};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Note { id: u32 }
/// #[derive(Debug)] struct NoteCreate;
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct NoteError(String);
///
/// #[async_trait]
/// impl TableRow for Note {
///     type Id = u32; type Create = NoteCreate; type Update = (); type Filter = ();
///     type Context = (); type Error = NoteError;
///     fn from_create(id: u32, _: NoteCreate) -> Result<Self, NoteError> { Ok(Self { id }) }
///     fn id(&self) -> u32 { self.id }
///     fn matches(&self, _: &()) -> bool { true }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), NoteError> { Ok(()) }
/// }
///
/// struct NoteClient { inner: TableClient<Note> }
///
/// impl TableAccess<Note> for NoteClient {
///     type Error = NoteError;
///     fn inner(&self) -> &TableClient<Note> { &self.inner }
///     fn map_error(e: TableError) -> NoteError { NoteError(e.to_string()) }
/// }
///
/// async fn usage(client: NoteClient) {
///     // get(), select() and delete() are provided.
///     let _ = client.get(1).await;
///     let _ = client.select(()).await;
/// }
/// ```
#[async_trait]
pub trait TableAccess<T: TableRow>: Send + Sync {
    /// The domain error type.
    type Error: Send + Sync;

    /// Access the wrapped table client.
    fn inner(&self) -> &TableClient<T>;

    /// Map table errors into the domain error type.
    fn map_error(e: TableError) -> Self::Error;

    /// Fetch a row by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every row matching `filter`, in ascending id order.
    #[tracing::instrument(skip(self))]
    async fn select(&self, filter: T::Filter) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().select(filter).await.map_err(Self::map_error)
    }

    /// Delete a row by id.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    /// Subscribe to the table's change feed.
    fn subscribe(&self) -> broadcast::Receiver<Change<T::Id>> {
        self.inner().subscribe()
    }
}
