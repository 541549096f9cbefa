//! # Table Client
//!
//! The cloneable handle used to talk to a [`TableActor`](crate::TableActor).

use crate::error::TableError;
use crate::message::{Change, TableRequest, Upserted};
use crate::row::TableRow;
use tokio::sync::{broadcast, mpsc, oneshot};

/// A type-safe client for one table.
///
/// Holds the request sender and a handle on the change feed, so cloning is cheap and clones can
/// be moved into any task. Every method is a single request/response round trip.
pub struct TableClient<T: TableRow> {
    sender: mpsc::Sender<TableRequest<T>>,
    changes: broadcast::Sender<Change<T::Id>>,
}

impl<T: TableRow> Clone for TableClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            changes: self.changes.clone(),
        }
    }
}

impl<T: TableRow> TableClient<T> {
    pub fn new(
        sender: mpsc::Sender<TableRequest<T>>,
        changes: broadcast::Sender<Change<T::Id>>,
    ) -> Self {
        Self { sender, changes }
    }

    /// Subscribes to the table's change feed. Only changes made after this call are delivered.
    pub fn subscribe(&self) -> broadcast::Receiver<Change<T::Id>> {
        self.changes.subscribe()
    }

    pub async fn insert(&self, params: T::Create) -> Result<T::Id, TableError> {
        self.request(|respond_to| TableRequest::Insert { params, respond_to })
            .await
    }

    pub async fn upsert(&self, params: T::Create) -> Result<Upserted<T::Id>, TableError> {
        self.request(|respond_to| TableRequest::Upsert { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, TableError> {
        self.request(|respond_to| TableRequest::Get { id, respond_to })
            .await
    }

    pub async fn select(&self, filter: T::Filter) -> Result<Vec<T>, TableError> {
        self.request(|respond_to| TableRequest::Select { filter, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, TableError> {
        self.request(|respond_to| TableRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), TableError> {
        self.request(|respond_to| TableRequest::Delete { id, respond_to })
            .await
    }

    pub async fn delete_where(&self, filter: T::Filter) -> Result<usize, TableError> {
        self.request(|respond_to| TableRequest::DeleteWhere { filter, respond_to })
            .await
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, TableError>>) -> TableRequest<T>,
    ) -> Result<R, TableError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| TableError::TableClosed)?;
        response.await.map_err(|_| TableError::TableDropped)?
    }
}
