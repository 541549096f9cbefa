/// One purchaser's line item inside a group.
///
/// Item name and price are copied from the menu at order time, so later menu edits never change
/// what was already ordered.
use crate::model::GroupId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub group_id: GroupId,
    pub item_name: String,
    pub price: f64,
    pub quantity: u32,
    pub customer_name: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for placing an order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub group_id: GroupId,
    pub item_name: String,
    pub price: f64,
    pub quantity: u32,
    pub customer_name: String,
}

#[derive(Debug, Clone)]
pub enum OrderFilter {
    ByGroup(GroupId),
}
