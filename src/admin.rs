//! # Admin Console
//!
//! Store and menu maintenance. Every operation requires a signed-in admin session.
//!
//! Deleting a store is orchestrated here, not by the tables: image, orders of the store's groups,
//! groups, products, then the store itself. The steps are sequential and not atomic; if one
//! fails, the earlier ones stay done.

use crate::auth::AuthService;
use crate::clients::{GroupClient, OrderClient, ProductClient, StoreClient};
use crate::error::AppError;
use crate::import::parse_menu;
use crate::lifecycle::Backend;
use crate::model::{Product, ProductCreate, ProductId, Store, StoreCreate, StoreId};
use crate::storage::ImageStore;
use crate::store_table::StoreError;
use std::io::Read;
use std::sync::Arc;
use table_actor::TableAccess;
use tracing::{info, instrument, warn};

/// An image picked in the store form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// The "add / edit store" form.
#[derive(Debug, Clone, Default)]
pub struct StoreForm {
    pub name: String,
    pub phone: Option<String>,
    pub image: Option<ImageUpload>,
}

pub struct AdminConsole {
    auth: Arc<AuthService>,
    images: Arc<dyn ImageStore>,
    stores: StoreClient,
    products: ProductClient,
    groups: GroupClient,
    orders: OrderClient,
}

impl AdminConsole {
    pub fn new(backend: &Backend, auth: Arc<AuthService>, images: Arc<dyn ImageStore>) -> Self {
        Self {
            auth,
            images,
            stores: backend.stores.clone(),
            products: backend.products.clone(),
            groups: backend.groups.clone(),
            orders: backend.orders.clone(),
        }
    }

    fn authorize(&self) -> Result<(), AppError> {
        self.auth
            .require_session()
            .map(|_| ())
            .map_err(|_| AppError::Unauthorized)
    }

    pub async fn stores(&self) -> Result<Vec<Store>, AppError> {
        self.authorize()?;
        Ok(self.stores.list_stores().await?)
    }

    /// Saves the store under its name, uploading the picture first if one was picked.
    #[instrument(skip(self, form), fields(name = %form.name))]
    pub async fn save_store(&self, form: StoreForm) -> Result<StoreId, AppError> {
        self.authorize()?;
        let name = form.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("Store name is required".to_string()));
        }

        let image_url = match form.image {
            Some(upload) => {
                let path = self.images.upload(&upload.file_name, upload.bytes).await?;
                Some(self.images.public_url(&path))
            }
            None => None,
        };

        let outcome = self
            .stores
            .save_store(StoreCreate {
                name,
                image_url,
                phone: form
                    .phone
                    .map(|phone| phone.trim().to_string())
                    .filter(|phone| !phone.is_empty()),
            })
            .await?;
        info!(?outcome, "Store saved");
        Ok(outcome.id())
    }

    /// Deletes a store and everything hanging off it.
    ///
    /// Image removal is best effort: a failure is logged and the delete carries on.
    #[instrument(skip(self))]
    pub async fn delete_store(&self, store_id: StoreId) -> Result<(), AppError> {
        self.authorize()?;
        let store = self
            .stores
            .get(store_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(store_id.to_string()))?;

        if let Some(url) = &store.image_url {
            match self.images.path_from_url(url) {
                Some(path) => {
                    if let Err(e) = self.images.remove(&path).await {
                        warn!(%store_id, %path, error = %e, "Image removal failed, continuing");
                    }
                }
                None => warn!(%store_id, %url, "Image URL not from this storage, skipped"),
            }
        }

        let groups = self.groups.for_store(store_id).await?;
        for group in &groups {
            self.orders.delete_by_group(group.id).await?;
        }
        let removed_groups = self.groups.delete_by_store(store_id).await?;
        let removed_products = self.products.delete_by_store(store_id).await?;
        self.stores.delete(store_id).await?;

        info!(
            %store_id,
            removed_groups, removed_products, "Store deleted"
        );
        Ok(())
    }

    pub async fn menu(&self, store_id: StoreId) -> Result<Vec<Product>, AppError> {
        self.authorize()?;
        Ok(self.products.menu(store_id).await?)
    }

    /// Adds one menu item. A name the store already lists is rejected.
    #[instrument(skip(self))]
    pub async fn add_menu_item(
        &self,
        store_id: StoreId,
        name: &str,
        price: f64,
        note: Option<String>,
    ) -> Result<ProductId, AppError> {
        self.authorize()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Item name is required".to_string()));
        }
        check_price(price)?;

        let product_id = self
            .products
            .add_product(ProductCreate {
                store_id,
                name: name.to_string(),
                price,
                description: note.filter(|note| !note.trim().is_empty()),
            })
            .await?;
        Ok(product_id)
    }

    #[instrument(skip(self))]
    pub async fn update_price(&self, product_id: ProductId, price: f64) -> Result<Product, AppError> {
        self.authorize()?;
        check_price(price)?;
        Ok(self.products.update_price(product_id, price).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete_menu_item(&self, product_id: ProductId) -> Result<(), AppError> {
        self.authorize()?;
        Ok(self.products.delete(product_id).await?)
    }

    /// Imports a spreadsheet export into the store's menu, updating items that already exist.
    /// Returns the number of rows applied.
    #[instrument(skip(self, reader))]
    pub async fn import_menu<R: Read>(&self, store_id: StoreId, reader: R) -> Result<usize, AppError> {
        self.authorize()?;
        let rows = parse_menu(reader)?;

        let mut applied = 0;
        for row in rows {
            self.products
                .upsert_product(ProductCreate {
                    store_id,
                    name: row.name,
                    price: row.price,
                    description: row.note,
                })
                .await?;
            applied += 1;
        }
        info!(%store_id, applied, "Menu imported");
        Ok(applied)
    }
}

fn check_price(price: f64) -> Result<(), AppError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(AppError::Validation(
            "Price must be a non-negative number".to_string(),
        ))
    }
}
