/// A menu item offered by one store.
///
/// # Table
/// Stored in the products [`TableActor`](table_actor::TableActor). `(store_id, name)` is the
/// conflict key, which is what lets a spreadsheet re-import update prices in place.
///
/// See [`impl TableRow for Product`](#impl-TableRow-for-Product) for details on:
/// - Creation parameters ([`ProductCreate`])
/// - Update parameters ([`ProductUpdate`])
use crate::model::StoreId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub store_id: StoreId,
    pub name: String,
    pub price: f64,
    /// Free-text note shown under the item, e.g. "no onion".
    pub description: Option<String>,
}

/// Payload for inserting or upserting a menu item.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub store_id: StoreId,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
}

/// Price change for an existing menu item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub price: f64,
}

#[derive(Debug, Clone)]
pub enum ProductFilter {
    ByStore(StoreId),
}
