//! [`TableRow`] implementation for [`Store`].

use crate::model::{Store, StoreCreate, StoreFilter, StoreId};
use crate::store_table::StoreError;
use async_trait::async_trait;
use table_actor::TableRow;

#[async_trait]
impl TableRow for Store {
    type Id = StoreId;
    type Create = StoreCreate;
    type Update = ();
    type Filter = StoreFilter;
    type Context = ();
    type Error = StoreError;

    fn from_create(id: StoreId, params: StoreCreate) -> Result<Self, StoreError> {
        let name = params.name.trim();
        if name.is_empty() {
            return Err(StoreError::ValidationError("name is required".to_string()));
        }
        Ok(Self {
            id,
            name: name.to_string(),
            image_url: params.image_url,
            phone: params.phone,
        })
    }

    fn id(&self) -> StoreId {
        self.id
    }

    fn matches(&self, filter: &StoreFilter) -> bool {
        match filter {
            StoreFilter::All => true,
        }
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.name.clone())
    }

    fn create_key(params: &StoreCreate) -> Option<String> {
        Some(params.name.trim().to_string())
    }

    /// Upsert by name. Fields the payload leaves out keep their stored value.
    fn merge(&mut self, params: StoreCreate) -> Result<(), StoreError> {
        if params.image_url.is_some() {
            self.image_url = params.image_url;
        }
        if params.phone.is_some() {
            self.phone = params.phone;
        }
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &()) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, phone: Option<&str>) -> StoreCreate {
        StoreCreate {
            name: name.to_string(),
            image_url: None,
            phone: phone.map(str::to_string),
        }
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let err = Store::from_create(StoreId(1), create("   ", None)).unwrap_err();
        assert!(matches!(err, StoreError::ValidationError(_)));
    }

    #[test]
    fn test_name_is_trimmed_for_key_and_row() {
        let store = Store::from_create(StoreId(1), create("  Golden Wok ", None)).unwrap();
        assert_eq!(store.name, "Golden Wok");
        assert_eq!(
            Store::create_key(&create("  Golden Wok ", None)),
            store.unique_key()
        );
    }

    #[test]
    fn test_merge_keeps_fields_left_out() {
        let mut store = Store {
            id: StoreId(1),
            name: "Golden Wok".to_string(),
            image_url: Some("https://img/wok.png".to_string()),
            phone: Some("02-1234".to_string()),
        };
        store.merge(create("Golden Wok", Some("02-9999"))).unwrap();
        assert_eq!(store.phone.as_deref(), Some("02-9999"));
        assert_eq!(store.image_url.as_deref(), Some("https://img/wok.png"));
    }
}
