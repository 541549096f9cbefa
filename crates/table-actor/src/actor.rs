//! # Table Actor
//!
//! This module defines the `TableActor`, the server side of a table. It owns every row of one
//! [`TableRow`] type, processes requests one at a time, and publishes a change notification after
//! each successful mutation.

use crate::client::TableClient;
use crate::error::TableError;
use crate::message::{Change, ChangeKind, TableRequest, Upserted};
use crate::row::TableRow;
use std::collections::BTreeMap;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

/// Capacity of the change feed. Subscribers that fall further behind observe `Lagged`
/// and are expected to re-fetch.
pub const CHANGE_FEED_CAPACITY: usize = 256;

/// The actor that owns one table.
///
/// # Architecture Note
/// The actor is the only owner of `rows`, so there is no `Mutex` around them: requests are
/// processed sequentially in [`TableActor::run`]. Two clients inserting concurrently simply
/// queue on the channel. This is also what makes upsert safe: the conflict lookup and the
/// write happen inside one message.
///
/// Rows live in a `BTreeMap`, so `select` returns them in ascending id order, which is the
/// default ordering every caller starts from.
///
/// # Usage Pattern
///
/// 1.  **Create**: `TableActor::new()` returns the actor and a cloneable [`TableClient`].
/// 2.  **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// ```rust
/// use table_actor::{TableActor, TableRow};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Note { id: u32, text: String }
/// #[derive(Debug)] struct NoteCreate { text: String }
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl TableRow for Note {
///     type Id = u32;
///     type Create = NoteCreate;
///     type Update = ();
///     type Filter = ();
///     type Context = ();
///     type Error = NoteError;
///
///     fn from_create(id: u32, params: NoteCreate) -> Result<Self, NoteError> {
///         Ok(Self { id, text: params.text })
///     }
///     fn id(&self) -> u32 { self.id }
///     fn matches(&self, _: &()) -> bool { true }
///     async fn on_update(&mut self, _: (), _: &()) -> Result<(), NoteError> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = TableActor::<Note>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let id = client.insert(NoteCreate { text: "hi".into() }).await.unwrap();
///     assert_eq!(id, 1);
/// }
/// ```
pub struct TableActor<T: TableRow> {
    receiver: mpsc::Receiver<TableRequest<T>>,
    changes: broadcast::Sender<Change<T::Id>>,
    rows: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: TableRow> TableActor<T> {
    /// Creates a new table and its client.
    ///
    /// `buffer_size` is the capacity of the request channel; callers wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, TableClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (changes, _) = broadcast::channel(CHANGE_FEED_CAPACITY);
        let actor = Self {
            receiver,
            changes: changes.clone(),
            rows: BTreeMap::new(),
            next_id: 1,
        };
        let client = TableClient::new(sender, changes);
        (actor, client)
    }

    /// Runs the request loop until every client has been dropped.
    ///
    /// # Context Injection
    /// `context` is handed to every row hook. It is supplied here, not in `new()`, so that a
    /// table can depend on clients of tables created after it.
    pub async fn run(mut self, context: T::Context) {
        // "Order" instead of "group_order::model::order::Order"
        let table = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(table, "Table started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                TableRequest::Insert { params, respond_to } => {
                    debug!(table, ?params, "Insert");
                    let result = self.insert(params, &context).await;
                    match &result {
                        Ok(id) => info!(table, %id, size = self.rows.len(), "Inserted"),
                        Err(e) => warn!(table, error = %e, "Insert failed"),
                    }
                    let _ = respond_to.send(result);
                }
                TableRequest::Upsert { params, respond_to } => {
                    debug!(table, ?params, "Upsert");
                    let result = self.upsert(params, &context).await;
                    match &result {
                        Ok(outcome) => info!(table, ?outcome, size = self.rows.len(), "Upserted"),
                        Err(e) => warn!(table, error = %e, "Upsert failed"),
                    }
                    let _ = respond_to.send(result);
                }
                TableRequest::Get { id, respond_to } => {
                    let row = self.rows.get(&id).cloned();
                    debug!(table, %id, found = row.is_some(), "Get");
                    let _ = respond_to.send(Ok(row));
                }
                TableRequest::Select { filter, respond_to } => {
                    let rows: Vec<T> = self
                        .rows
                        .values()
                        .filter(|row| row.matches(&filter))
                        .cloned()
                        .collect();
                    debug!(table, ?filter, count = rows.len(), "Select");
                    let _ = respond_to.send(Ok(rows));
                }
                TableRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(table, %id, ?update, "Update");
                    let result = self.update(id.clone(), update, &context).await;
                    match &result {
                        Ok(_) => info!(table, %id, "Updated"),
                        Err(e) => warn!(table, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                TableRequest::Delete { id, respond_to } => {
                    debug!(table, %id, "Delete");
                    let result = self.delete(id.clone(), &context).await;
                    match &result {
                        Ok(()) => info!(table, %id, size = self.rows.len(), "Deleted"),
                        Err(e) => warn!(table, %id, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result);
                }
                TableRequest::DeleteWhere { filter, respond_to } => {
                    debug!(table, ?filter, "DeleteWhere");
                    let result = self.delete_where(&filter, &context).await;
                    match &result {
                        Ok(count) => info!(table, count, size = self.rows.len(), "Deleted rows"),
                        Err(e) => warn!(table, error = %e, "DeleteWhere failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(table, size = self.rows.len(), "Shutdown");
    }

    async fn insert(&mut self, params: T::Create, context: &T::Context) -> Result<T::Id, TableError> {
        if let Some(key) = T::create_key(&params) {
            if self.find_by_key(&key).is_some() {
                return Err(TableError::Conflict(key));
            }
        }

        let id = T::Id::from(self.next_id);
        let mut row = T::from_create(id.clone(), params).map_err(row_error)?;
        row.on_create(context).await.map_err(row_error)?;

        self.next_id += 1;
        self.rows.insert(id.clone(), row);
        self.publish(ChangeKind::Inserted, id.clone());
        Ok(id)
    }

    async fn upsert(
        &mut self,
        params: T::Create,
        context: &T::Context,
    ) -> Result<Upserted<T::Id>, TableError> {
        let existing = T::create_key(&params).and_then(|key| self.find_by_key(&key));

        match existing {
            Some(id) => {
                let row = self
                    .rows
                    .get_mut(&id)
                    .ok_or_else(|| TableError::NotFound(id.to_string()))?;
                row.merge(params).map_err(row_error)?;
                self.publish(ChangeKind::Updated, id.clone());
                Ok(Upserted::Updated(id))
            }
            None => self.insert(params, context).await.map(Upserted::Inserted),
        }
    }

    async fn update(
        &mut self,
        id: T::Id,
        update: T::Update,
        context: &T::Context,
    ) -> Result<T, TableError> {
        // Work on a copy so a failing hook or a key collision leaves the stored row untouched.
        let mut candidate = self
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| TableError::NotFound(id.to_string()))?;
        candidate.on_update(update, context).await.map_err(row_error)?;

        if let Some(key) = candidate.unique_key() {
            if self.find_by_key(&key).is_some_and(|owner| owner != id) {
                return Err(TableError::Conflict(key));
            }
        }

        self.rows.insert(id.clone(), candidate.clone());
        self.publish(ChangeKind::Updated, id);
        Ok(candidate)
    }

    async fn delete(&mut self, id: T::Id, context: &T::Context) -> Result<(), TableError> {
        let row = self
            .rows
            .get(&id)
            .ok_or_else(|| TableError::NotFound(id.to_string()))?;
        row.on_delete(context).await.map_err(row_error)?;

        self.rows.remove(&id);
        self.publish(ChangeKind::Deleted, id);
        Ok(())
    }

    /// Deletes every row matching `filter`. If any `on_delete` hook refuses, nothing is removed.
    async fn delete_where(
        &mut self,
        filter: &T::Filter,
        context: &T::Context,
    ) -> Result<usize, TableError> {
        let doomed: Vec<T::Id> = self
            .rows
            .values()
            .filter(|row| row.matches(filter))
            .map(|row| row.id())
            .collect();

        for id in &doomed {
            if let Some(row) = self.rows.get(id) {
                row.on_delete(context).await.map_err(row_error)?;
            }
        }

        for id in &doomed {
            self.rows.remove(id);
            self.publish(ChangeKind::Deleted, id.clone());
        }
        Ok(doomed.len())
    }

    fn find_by_key(&self, key: &str) -> Option<T::Id> {
        self.rows
            .values()
            .find(|row| row.unique_key().as_deref() == Some(key))
            .map(|row| row.id())
    }

    fn publish(&self, kind: ChangeKind, id: T::Id) {
        // Err only means nobody is subscribed right now.
        let _ = self.changes.send(Change { kind, id });
    }
}

fn row_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> TableError {
    TableError::RowError(Box::new(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Dish {
        id: u32,
        shop: u32,
        name: String,
        price: f64,
    }

    #[derive(Debug)]
    struct DishCreate {
        shop: u32,
        name: String,
        price: f64,
    }

    #[derive(Debug)]
    struct DishUpdate {
        name: Option<String>,
        price: Option<f64>,
    }

    #[derive(Debug, thiserror::Error)]
    enum DishError {
        #[error("negative price")]
        NegativePrice,
        #[error("dish is locked")]
        Locked,
    }

    #[async_trait]
    impl TableRow for Dish {
        type Id = u32;
        type Create = DishCreate;
        type Update = DishUpdate;
        type Filter = u32;
        type Context = ();
        type Error = DishError;

        fn from_create(id: u32, params: DishCreate) -> Result<Self, DishError> {
            if params.price < 0.0 {
                return Err(DishError::NegativePrice);
            }
            Ok(Self {
                id,
                shop: params.shop,
                name: params.name,
                price: params.price,
            })
        }

        fn id(&self) -> u32 {
            self.id
        }

        fn matches(&self, shop: &u32) -> bool {
            self.shop == *shop
        }

        fn unique_key(&self) -> Option<String> {
            Some(format!("{}/{}", self.shop, self.name))
        }

        fn create_key(params: &DishCreate) -> Option<String> {
            Some(format!("{}/{}", params.shop, params.name))
        }

        fn merge(&mut self, params: DishCreate) -> Result<(), DishError> {
            self.price = params.price;
            Ok(())
        }

        async fn on_update(&mut self, update: DishUpdate, _ctx: &()) -> Result<(), DishError> {
            if let Some(name) = update.name {
                self.name = name;
            }
            if let Some(price) = update.price {
                self.price = price;
            }
            Ok(())
        }

        async fn on_delete(&self, _ctx: &()) -> Result<(), DishError> {
            if self.name == "locked" {
                return Err(DishError::Locked);
            }
            Ok(())
        }
    }

    fn dish(shop: u32, name: &str, price: f64) -> DishCreate {
        DishCreate {
            shop,
            name: name.to_string(),
            price,
        }
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_key() {
        let (actor, client) = TableActor::<Dish>::new(10);
        tokio::spawn(actor.run(()));

        client.insert(dish(1, "Noodles", 80.0)).await.unwrap();
        let err = client.insert(dish(1, "Noodles", 90.0)).await.unwrap_err();
        assert!(matches!(err, TableError::Conflict(key) if key == "1/Noodles"));

        // Same name under another shop is a different key.
        client.insert(dish(2, "Noodles", 90.0)).await.unwrap();
        assert_eq!(client.select(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_merges_on_conflict_key() {
        let (actor, client) = TableActor::<Dish>::new(10);
        tokio::spawn(actor.run(()));

        let first = client.upsert(dish(1, "Rice", 50.0)).await.unwrap();
        let second = client.upsert(dish(1, "Rice", 55.0)).await.unwrap();
        assert_eq!(first, Upserted::Inserted(1));
        assert_eq!(second, Upserted::Updated(1));

        let rows = client.select(1).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].price, 55.0);
    }

    #[tokio::test]
    async fn test_failed_insert_does_not_consume_id() {
        let (actor, client) = TableActor::<Dish>::new(10);
        tokio::spawn(actor.run(()));

        assert!(client.insert(dish(1, "Bad", -1.0)).await.is_err());
        let id = client.insert(dish(1, "Good", 1.0)).await.unwrap();
        assert_eq!(id, 1);
    }

    #[tokio::test]
    async fn test_update_to_taken_key_is_rejected() {
        let (actor, client) = TableActor::<Dish>::new(10);
        tokio::spawn(actor.run(()));

        client.insert(dish(1, "Soup", 30.0)).await.unwrap();
        let salad = client.insert(dish(1, "Salad", 40.0)).await.unwrap();

        let rename = DishUpdate {
            name: Some("Soup".to_string()),
            price: None,
        };
        assert!(matches!(
            client.update(salad, rename).await,
            Err(TableError::Conflict(_))
        ));
        let stored = client.get(salad).await.unwrap().unwrap();
        assert_eq!(stored.name, "Salad");
    }

    #[tokio::test]
    async fn test_delete_where_is_all_or_nothing() {
        let (actor, client) = TableActor::<Dish>::new(10);
        tokio::spawn(actor.run(()));

        client.insert(dish(1, "Tea", 20.0)).await.unwrap();
        client.insert(dish(1, "locked", 20.0)).await.unwrap();
        client.insert(dish(2, "Tea", 25.0)).await.unwrap();

        assert!(client.delete_where(1).await.is_err());
        assert_eq!(client.select(1).await.unwrap().len(), 2);

        assert_eq!(client.delete_where(2).await.unwrap(), 1);
        assert!(client.select(2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_change_feed_reports_each_mutation() {
        let (actor, client) = TableActor::<Dish>::new(10);
        let mut changes = client.subscribe();
        tokio::spawn(actor.run(()));

        let id = client.insert(dish(3, "Bun", 15.0)).await.unwrap();
        client.upsert(dish(3, "Bun", 16.0)).await.unwrap();
        client.delete(id).await.unwrap();

        let kinds: Vec<ChangeKind> = vec![
            changes.recv().await.unwrap().kind,
            changes.recv().await.unwrap().kind,
            changes.recv().await.unwrap().kind,
        ];
        assert_eq!(
            kinds,
            vec![ChangeKind::Inserted, ChangeKind::Updated, ChangeKind::Deleted]
        );
        assert!(changes.try_recv().is_err());
    }
}
