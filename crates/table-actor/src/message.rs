//! # Table Messages
//!
//! Request and change-notification types exchanged between [`TableClient`](crate::TableClient)
//! and [`TableActor`](crate::TableActor).

use crate::error::TableError;
use crate::row::TableRow;
use tokio::sync::oneshot;

/// One-shot response channel used by tables.
pub type Response<T> = oneshot::Sender<Result<T, TableError>>;

/// Request sent to a table actor.
///
/// The variants mirror what a hosted row store offers a client SDK: insert, upsert on a
/// conflict target, point reads, filtered selects, partial updates, point deletes and
/// filtered deletes. Everything is typed through the associated types of [`TableRow`], so
/// a `ProductCreate` can never reach the orders table.
#[derive(Debug)]
pub enum TableRequest<T: TableRow> {
    Insert {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Upsert {
        params: T::Create,
        respond_to: Response<Upserted<T::Id>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Select {
        filter: T::Filter,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    DeleteWhere {
        filter: T::Filter,
        respond_to: Response<usize>,
    },
}

/// Outcome of an upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted<Id> {
    Inserted(Id),
    Updated(Id),
}

impl<Id: Clone> Upserted<Id> {
    pub fn id(&self) -> Id {
        match self {
            Upserted::Inserted(id) | Upserted::Updated(id) => id.clone(),
        }
    }
}

/// Kind of mutation a [`Change`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Inserted,
    Updated,
    Deleted,
}

/// Change notification published on a table's broadcast feed after every successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change<Id> {
    pub kind: ChangeKind,
    pub id: Id,
}
