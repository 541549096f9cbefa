//! [`TableRow`] implementation for [`Order`].
//!
//! Orders are immutable once placed. The deadline is not checked here: that gate lives in the
//! ordering page, before the request is ever sent.

use crate::clients::GroupClient;
use crate::model::{Order, OrderCreate, OrderFilter, OrderId};
use crate::order_table::OrderError;
use async_trait::async_trait;
use chrono::Utc;
use table_actor::{TableAccess, TableRow};
use tracing::debug;

#[async_trait]
impl TableRow for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Filter = OrderFilter;
    type Context = GroupClient;
    type Error = OrderError;

    fn from_create(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        let customer_name = params.customer_name.trim();
        if customer_name.is_empty() {
            return Err(OrderError::ValidationError(
                "customer name is required".to_string(),
            ));
        }
        if !params.price.is_finite() || params.price < 0.0 {
            return Err(OrderError::ValidationError(format!(
                "invalid price {}",
                params.price
            )));
        }
        Ok(Self {
            id,
            group_id: params.group_id,
            item_name: params.item_name,
            price: params.price,
            quantity: params.quantity,
            customer_name: customer_name.to_string(),
            created_at: Utc::now(),
        })
    }

    fn id(&self) -> OrderId {
        self.id
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        match filter {
            OrderFilter::ByGroup(group_id) => self.group_id == *group_id,
        }
    }

    async fn on_create(&mut self, groups: &GroupClient) -> Result<(), OrderError> {
        debug!(group_id = %self.group_id, "Checking group exists");
        if groups.get(self.group_id).await?.is_none() {
            return Err(OrderError::MissingGroup(self.group_id.to_string()));
        }
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _groups: &GroupClient) -> Result<(), OrderError> {
        Ok(())
    }
}
