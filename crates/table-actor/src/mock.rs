//! # Mock Tables & Testing Guide
//!
//! [`MockTable<T>`] hands out a real [`TableClient<T>`] whose requests are answered from a queue of
//! expectations instead of a running [`TableActor`](crate::TableActor). Use it to test code that
//! *calls* a table (domain clients, orchestration) without spinning up the table itself.
//!
//! ## When to use Mocks vs Real Tables
//!
//! | Feature | MockTable | Real TableActor |
//! |---------|-----------|-----------------|
//! | **State** | None, answers are scripted | Real rows |
//! | **Determinism** | Fully deterministic | Subject to scheduler |
//! | **Error Injection** | Easy (`return_err`) | Needs a failing row hook |
//! | **Use Case** | Logic *around* a client | The table itself, or the full system |
//!
//! ## Example
//!
//! ```rust
//! use table_actor::mock::MockTable;
//! use table_actor::{TableError, TableRow};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, PartialEq)] struct Note { id: u32 }
//! #[derive(Debug)] struct NoteCreate;
//! #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
//!
//! #[async_trait]
//! impl TableRow for Note {
//!     type Id = u32; type Create = NoteCreate; type Update = (); type Filter = ();
//!     type Context = (); type Error = NoteError;
//!     fn from_create(id: u32, _: NoteCreate) -> Result<Self, NoteError> { Ok(Self { id }) }
//!     fn id(&self) -> u32 { self.id }
//!     fn matches(&self, _: &()) -> bool { true }
//!     async fn on_update(&mut self, _: (), _: &()) -> Result<(), NoteError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockTable::<Note>::new();
//!     mock.expect_get(1).return_ok(Some(Note { id: 1 }));
//!     mock.expect_insert().return_err(TableError::TableClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.get(1).await.unwrap(), Some(Note { id: 1 }));
//!     assert!(matches!(client.insert(NoteCreate).await, Err(TableError::TableClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! ## Change Feed
//!
//! [`MockTable::publish`] pushes a [`Change`] to every subscriber of the mock's client, which is how
//! subscription code is driven in tests without a real mutation.

use crate::client::TableClient;
use crate::error::TableError;
use crate::message::{Change, TableRequest, Upserted};
use crate::row::TableRow;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{broadcast, mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// A scripted answer to one request.
enum Expectation<T: TableRow> {
    Insert(Result<T::Id, TableError>),
    Upsert(Result<Upserted<T::Id>, TableError>),
    Get(T::Id, Result<Option<T>, TableError>),
    Select(Result<Vec<T>, TableError>),
    Update(T::Id, Result<T, TableError>),
    Delete(T::Id, Result<(), TableError>),
    DeleteWhere(Result<usize, TableError>),
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock table with expectation tracking.
///
/// Requests are matched against expectations in FIFO order. A request that does not match the
/// next expectation (wrong kind or wrong id) panics the background task, which surfaces in the
/// test as `TableError::TableDropped` and a failed [`MockTable::verify`].
pub struct MockTable<T: TableRow> {
    client: TableClient<T>,
    changes: broadcast::Sender<Change<T::Id>>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: TableRow> Default for MockTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TableRow> MockTable<T> {
    /// Creates a mock table with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<TableRequest<T>>(100);
        let (changes, _) = broadcast::channel(crate::actor::CHANGE_FEED_CAPACITY);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().unwrap().pop_front();

                match (request, next) {
                    (TableRequest::Insert { respond_to, .. }, Some(Expectation::Insert(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (TableRequest::Upsert { respond_to, .. }, Some(Expectation::Upsert(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (TableRequest::Get { id, respond_to }, Some(Expectation::Get(want, r))) => {
                        assert_eq!(id, want, "get called with unexpected id");
                        let _ = respond_to.send(r);
                    }
                    (TableRequest::Select { respond_to, .. }, Some(Expectation::Select(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (
                        TableRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update(want, r)),
                    ) => {
                        assert_eq!(id, want, "update called with unexpected id");
                        let _ = respond_to.send(r);
                    }
                    (TableRequest::Delete { id, respond_to }, Some(Expectation::Delete(want, r))) => {
                        assert_eq!(id, want, "delete called with unexpected id");
                        let _ = respond_to.send(r);
                    }
                    (
                        TableRequest::DeleteWhere { respond_to, .. },
                        Some(Expectation::DeleteWhere(r)),
                    ) => {
                        let _ = respond_to.send(r);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: TableClient::new(sender, changes.clone()),
            changes,
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> TableClient<T> {
        self.client.clone()
    }

    /// Publishes a change to subscribers of the mock's client.
    pub fn publish(&self, change: Change<T::Id>) {
        let _ = self.changes.send(change);
    }

    pub fn expect_insert(&mut self) -> Expect<T, T::Id> {
        self.expect(Expectation::Insert)
    }

    pub fn expect_upsert(&mut self) -> Expect<T, Upserted<T::Id>> {
        self.expect(Expectation::Upsert)
    }

    pub fn expect_get(&mut self, id: T::Id) -> Expect<T, Option<T>> {
        self.expect(move |r| Expectation::Get(id, r))
    }

    pub fn expect_select(&mut self) -> Expect<T, Vec<T>> {
        self.expect(Expectation::Select)
    }

    pub fn expect_update(&mut self, id: T::Id) -> Expect<T, T> {
        self.expect(move |r| Expectation::Update(id, r))
    }

    pub fn expect_delete(&mut self, id: T::Id) -> Expect<T, ()> {
        self.expect(move |r| Expectation::Delete(id, r))
    }

    pub fn expect_delete_where(&mut self) -> Expect<T, usize> {
        self.expect(Expectation::DeleteWhere)
    }

    /// Panics if any expectation was not consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn expect<R>(
        &mut self,
        wrap: impl FnOnce(Result<R, TableError>) -> Expectation<T> + Send + 'static,
    ) -> Expect<T, R> {
        Expect {
            wrap: Box::new(wrap),
            expectations: self.expectations.clone(),
        }
    }
}

/// Builder that completes an expectation with its scripted answer.
pub struct Expect<T: TableRow, R> {
    wrap: Box<dyn FnOnce(Result<R, TableError>) -> Expectation<T> + Send>,
    expectations: Queue<T>,
}

impl<T: TableRow, R> Expect<T, R> {
    /// Answer the request with `Ok(value)`.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Answer the request with `Err(error)`.
    pub fn return_err(self, error: TableError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, TableError>) {
        let expectation = (self.wrap)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// CHANNEL-LEVEL HELPERS
// =============================================================================

/// Creates a client and hands back the raw request receiver, for tests that want to inspect
/// payloads before answering.
pub fn create_mock_client<T: TableRow>(
    buffer_size: usize,
) -> (TableClient<T>, mpsc::Receiver<TableRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (changes, _) = broadcast::channel(crate::actor::CHANGE_FEED_CAPACITY);
    (TableClient::new(sender, changes), receiver)
}

/// Next request must be an insert; returns its payload and responder.
pub async fn expect_insert<T: TableRow>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, TableError>>)> {
    match receiver.recv().await {
        Some(TableRequest::Insert { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next request must be an upsert; returns its payload and responder.
pub async fn expect_upsert<T: TableRow>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(
    T::Create,
    oneshot::Sender<Result<Upserted<T::Id>, TableError>>,
)> {
    match receiver.recv().await {
        Some(TableRequest::Upsert { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next request must be a select; returns its filter and responder.
pub async fn expect_select<T: TableRow>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(T::Filter, oneshot::Sender<Result<Vec<T>, TableError>>)> {
    match receiver.recv().await {
        Some(TableRequest::Select { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

/// Next request must be a filtered delete; returns its filter and responder.
pub async fn expect_delete_where<T: TableRow>(
    receiver: &mut mpsc::Receiver<TableRequest<T>>,
) -> Option<(T::Filter, oneshot::Sender<Result<usize, TableError>>)> {
    match receiver.recv().await {
        Some(TableRequest::DeleteWhere { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}
