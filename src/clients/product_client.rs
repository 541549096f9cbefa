use crate::model::{Product, ProductCreate, ProductFilter, ProductId, ProductUpdate, StoreId};
use crate::product_table::ProductError;
use async_trait::async_trait;
use table_actor::{TableAccess, TableClient, TableError, Upserted};
use tracing::{debug, instrument};

/// Client for the products table.
#[derive(Clone)]
pub struct ProductClient {
    inner: TableClient<Product>,
}

impl ProductClient {
    pub fn new(inner: TableClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl TableAccess<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &TableClient<Product> {
        &self.inner
    }

    fn map_error(e: TableError) -> Self::Error {
        ProductError::from(e)
    }
}

impl ProductClient {
    /// Adds a menu item. Fails with `AlreadyExists` if the store already lists this name.
    #[instrument(skip(self))]
    pub async fn add_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.insert(params).await.map_err(ProductError::from)
    }

    /// Adds the item or, if the store already lists it, updates its price (and note, if given).
    #[instrument(skip(self))]
    pub async fn upsert_product(
        &self,
        params: ProductCreate,
    ) -> Result<Upserted<ProductId>, ProductError> {
        debug!("Sending request");
        self.inner.upsert(params).await.map_err(ProductError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_price(&self, id: ProductId, price: f64) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner
            .update(id, ProductUpdate { price })
            .await
            .map_err(ProductError::from)
    }

    /// The store's menu, ascending id.
    pub async fn menu(&self, store_id: StoreId) -> Result<Vec<Product>, ProductError> {
        self.select(ProductFilter::ByStore(store_id)).await
    }

    #[instrument(skip(self))]
    pub async fn delete_by_store(&self, store_id: StoreId) -> Result<usize, ProductError> {
        debug!("Sending request");
        self.inner
            .delete_where(ProductFilter::ByStore(store_id))
            .await
            .map_err(ProductError::from)
    }
}
