use crate::model::{Store, StoreCreate, StoreFilter, StoreId};
use crate::store_table::StoreError;
use async_trait::async_trait;
use table_actor::{TableAccess, TableClient, TableError, Upserted};
use tracing::{debug, instrument};

/// Client for the stores table.
#[derive(Clone)]
pub struct StoreClient {
    inner: TableClient<Store>,
}

impl StoreClient {
    pub fn new(inner: TableClient<Store>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl TableAccess<Store> for StoreClient {
    type Error = StoreError;

    fn inner(&self) -> &TableClient<Store> {
        &self.inner
    }

    fn map_error(e: TableError) -> Self::Error {
        StoreError::from(e)
    }
}

impl StoreClient {
    /// Insert or update the store with this name.
    #[instrument(skip(self))]
    pub async fn save_store(&self, params: StoreCreate) -> Result<Upserted<StoreId>, StoreError> {
        debug!("Sending request");
        self.inner.upsert(params).await.map_err(StoreError::from)
    }

    /// All stores, ascending id.
    pub async fn list_stores(&self) -> Result<Vec<Store>, StoreError> {
        self.select(StoreFilter::All).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use table_actor::mock::{create_mock_client, expect_upsert, MockTable};

    #[tokio::test]
    async fn test_save_store_sends_upsert() {
        let (client, mut receiver) = create_mock_client::<Store>(10);
        let stores = StoreClient::new(client);

        let save = tokio::spawn(async move {
            stores
                .save_store(StoreCreate {
                    name: "Golden Wok".to_string(),
                    image_url: None,
                    phone: Some("02-1234".to_string()),
                })
                .await
        });

        let (params, responder) = expect_upsert(&mut receiver)
            .await
            .expect("Expected Upsert request");
        assert_eq!(params.name, "Golden Wok");
        responder.send(Ok(Upserted::Updated(StoreId(4)))).unwrap();

        assert_eq!(save.await.unwrap().unwrap(), Upserted::Updated(StoreId(4)));
    }

    #[tokio::test]
    async fn test_conflict_maps_to_already_exists() {
        let mut mock = MockTable::<Store>::new();
        mock.expect_insert()
            .return_err(TableError::Conflict("Golden Wok".to_string()));

        let err = mock
            .client()
            .insert(StoreCreate {
                name: "Golden Wok".to_string(),
                image_url: None,
                phone: None,
            })
            .await
            .map_err(StoreClient::map_error)
            .unwrap_err();
        assert_eq!(err, StoreError::AlreadyExists("Golden Wok".to_string()));
        mock.verify();
    }
}
