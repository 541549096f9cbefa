/// An order window: one store, one day, one deadline.
///
/// Several groups may be open on the same day. Orders are attached to a group, never to a store
/// directly, so closing a group is what ends a round of ordering.
use crate::model::{Store, StoreId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupId(pub u32);

impl From<u32> for GroupId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "group_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub store_id: StoreId,
    /// Local calendar day the group was opened on.
    pub order_date: NaiveDate,
    pub end_time: DateTime<Utc>,
    pub name: Option<String>,
}

/// Payload for opening a group.
#[derive(Debug, Clone)]
pub struct GroupCreate {
    pub store_id: StoreId,
    pub order_date: NaiveDate,
    pub end_time: DateTime<Utc>,
    pub name: Option<String>,
}

#[derive(Debug, Clone)]
pub enum GroupFilter {
    OnDate(NaiveDate),
    ByStore(StoreId),
}

/// A group joined with its store, as the ordering page lists them.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupWithStore {
    pub group: Group,
    pub store: Store,
}

impl GroupWithStore {
    /// Display name of the group, falling back to the store name.
    pub fn title(&self) -> &str {
        self.group.name.as_deref().unwrap_or(&self.store.name)
    }
}
