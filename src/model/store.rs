/// A restaurant whose menu can be ordered from.
///
/// # Table
/// Stored in the stores [`TableActor`](table_actor::TableActor); see
/// [`impl TableRow for Store`](#impl-TableRow-for-Store). The name is the conflict key, so saving
/// a store under an existing name updates that store instead of adding a second one.
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StoreId(pub u32);

impl From<u32> for StoreId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for StoreId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "store_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub image_url: Option<String>,
    pub phone: Option<String>,
}

/// Payload for inserting or upserting a store.
#[derive(Debug, Clone)]
pub struct StoreCreate {
    pub name: String,
    pub image_url: Option<String>,
    pub phone: Option<String>,
}

/// Which stores a select or filtered delete touches.
#[derive(Debug, Clone)]
pub enum StoreFilter {
    All,
}
