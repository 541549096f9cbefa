//! [`TableRow`] implementation for [`Product`].
//!
//! Menu items are keyed on `(store_id, name)`. Inserting requires the store to exist, which is
//! checked through the [`StoreClient`] handed to the table as its context.

use crate::clients::StoreClient;
use crate::model::{Product, ProductCreate, ProductFilter, ProductId, ProductUpdate, StoreId};
use crate::product_table::ProductError;
use async_trait::async_trait;
use table_actor::{TableAccess, TableRow};
use tracing::debug;

fn key(store_id: StoreId, name: &str) -> String {
    format!("{}/{}", store_id.0, name)
}

fn check_price(price: f64) -> Result<f64, ProductError> {
    if price.is_finite() && price >= 0.0 {
        Ok(price)
    } else {
        Err(ProductError::ValidationError(format!(
            "price must be a non-negative number, got {}",
            price
        )))
    }
}

#[async_trait]
impl TableRow for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Filter = ProductFilter;
    type Context = StoreClient;
    type Error = ProductError;

    fn from_create(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        let name = params.name.trim();
        if name.is_empty() {
            return Err(ProductError::ValidationError("name is required".to_string()));
        }
        Ok(Self {
            id,
            store_id: params.store_id,
            name: name.to_string(),
            price: check_price(params.price)?,
            description: params.description,
        })
    }

    fn id(&self) -> ProductId {
        self.id
    }

    fn matches(&self, filter: &ProductFilter) -> bool {
        match filter {
            ProductFilter::ByStore(store_id) => self.store_id == *store_id,
        }
    }

    fn unique_key(&self) -> Option<String> {
        Some(key(self.store_id, &self.name))
    }

    fn create_key(params: &ProductCreate) -> Option<String> {
        Some(key(params.store_id, params.name.trim()))
    }

    /// Re-import of an existing item: the price always follows the payload, the note only when
    /// the payload carries one.
    fn merge(&mut self, params: ProductCreate) -> Result<(), ProductError> {
        self.price = check_price(params.price)?;
        if params.description.is_some() {
            self.description = params.description;
        }
        Ok(())
    }

    async fn on_create(&mut self, stores: &StoreClient) -> Result<(), ProductError> {
        debug!(store_id = %self.store_id, "Checking store exists");
        match stores.get(self.store_id).await? {
            Some(_) => Ok(()),
            None => Err(ProductError::MissingStore(self.store_id.to_string())),
        }
    }

    async fn on_update(
        &mut self,
        update: ProductUpdate,
        _stores: &StoreClient,
    ) -> Result<(), ProductError> {
        self.price = check_price(update.price)?;
        Ok(())
    }
}
