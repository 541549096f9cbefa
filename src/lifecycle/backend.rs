use crate::clients::{GroupClient, OrderClient, ProductClient, StoreClient};
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Table task failed: {0}")]
    TaskFailed(String),
}

/// The four tables, running, and their clients.
///
/// `Backend` is responsible for:
/// - **Lifecycle Management**: starting every table and stopping them again
/// - **Dependency Wiring**: handing each table the clients its rows check against
///   (products and groups get a `StoreClient`, orders get a `GroupClient`)
///
/// # Example
///
/// ```rust
/// use group_order::lifecycle::Backend;
/// use group_order::model::StoreCreate;
///
/// #[tokio::main]
/// async fn main() {
///     let backend = Backend::start(32);
///
///     let saved = backend.stores.save_store(StoreCreate {
///         name: "Golden Wok".to_string(),
///         image_url: None,
///         phone: None,
///     }).await.unwrap();
///
///     backend.shutdown().await.unwrap();
/// }
/// ```
pub struct Backend {
    pub stores: StoreClient,
    pub products: ProductClient,
    pub groups: GroupClient,
    pub orders: OrderClient,

    /// Task handles for all running tables (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Backend {
    /// Creates every table and spawns it in its own Tokio task.
    ///
    /// `buffer_size` is the request channel capacity of each table. Must be called inside a Tokio
    /// runtime.
    pub fn start(buffer_size: usize) -> Self {
        // 1. Create tables (no dependencies)
        let (store_actor, stores) = crate::store_table::new(buffer_size);
        let (product_actor, products) = crate::product_table::new(buffer_size);
        let (group_actor, groups) = crate::group_table::new(buffer_size);
        let (order_actor, orders) = crate::order_table::new(buffer_size);

        // 2. Start tables with injected context
        let handles = vec![
            tokio::spawn(order_actor.run(groups.clone())),
            tokio::spawn(group_actor.run(stores.clone())),
            tokio::spawn(product_actor.run(stores.clone())),
            tokio::spawn(store_actor.run(())),
        ];
        info!("Backend started");

        Self {
            stores,
            products,
            groups,
            orders,
            handles,
        }
    }

    /// Drops the clients and waits for every table to stop.
    ///
    /// A table stops once every client of it is gone, including the clones held by boards,
    /// consoles, subscriptions and other tables' contexts. Stop and drop those first, or this
    /// waits for them.
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        info!("Shutting down backend...");

        drop(self.orders);
        drop(self.groups);
        drop(self.products);
        drop(self.stores);

        // Orders release their GroupClient, groups and products release their StoreClient,
        // so the handles finish in the order they were spawned.
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Table task failed: {:?}", e);
                return Err(LifecycleError::TaskFailed(e.to_string()));
            }
        }

        info!("Backend shutdown complete.");
        Ok(())
    }
}
