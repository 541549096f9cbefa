use crate::model::{GroupId, Order, OrderCreate, OrderFilter, OrderId};
use crate::order_table::OrderError;
use async_trait::async_trait;
use table_actor::{TableAccess, TableClient, TableError};
use tracing::{debug, info, instrument};

/// Client for the orders table.
///
/// The group check happens in `Order::on_create`; the deadline check happens before this client
/// is called.
#[derive(Clone)]
pub struct OrderClient {
    inner: TableClient<Order>,
}

impl OrderClient {
    pub fn new(inner: TableClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(group_id = %params.group_id))]
    pub async fn place_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!(?params, "place_order called");
        info!("Sending place_order to table");
        self.inner.insert(params).await.map_err(OrderError::from)
    }

    /// Orders of one group, ascending id.
    pub async fn for_group(&self, group_id: GroupId) -> Result<Vec<Order>, OrderError> {
        self.select(OrderFilter::ByGroup(group_id)).await
    }

    #[instrument(skip(self))]
    pub async fn delete_by_group(&self, group_id: GroupId) -> Result<usize, OrderError> {
        debug!("Sending request");
        self.inner
            .delete_where(OrderFilter::ByGroup(group_id))
            .await
            .map_err(OrderError::from)
    }
}

#[async_trait]
impl TableAccess<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &TableClient<Order> {
        &self.inner
    }

    fn map_error(e: TableError) -> Self::Error {
        OrderError::from(e)
    }
}
