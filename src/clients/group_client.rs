use crate::group_table::GroupError;
use crate::model::{Group, GroupCreate, GroupFilter, GroupId, StoreId};
use async_trait::async_trait;
use chrono::NaiveDate;
use table_actor::{TableAccess, TableClient, TableError};
use tracing::{debug, instrument};

/// Client for the groups table.
#[derive(Clone)]
pub struct GroupClient {
    inner: TableClient<Group>,
}

impl GroupClient {
    pub fn new(inner: TableClient<Group>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl TableAccess<Group> for GroupClient {
    type Error = GroupError;

    fn inner(&self) -> &TableClient<Group> {
        &self.inner
    }

    fn map_error(e: TableError) -> Self::Error {
        GroupError::from(e)
    }
}

impl GroupClient {
    #[instrument(skip(self))]
    pub async fn open_group(&self, params: GroupCreate) -> Result<GroupId, GroupError> {
        debug!("Sending request");
        self.inner.insert(params).await.map_err(GroupError::from)
    }

    /// Groups opened on `date`, ascending id.
    pub async fn on_date(&self, date: NaiveDate) -> Result<Vec<Group>, GroupError> {
        self.select(GroupFilter::OnDate(date)).await
    }

    pub async fn for_store(&self, store_id: StoreId) -> Result<Vec<Group>, GroupError> {
        self.select(GroupFilter::ByStore(store_id)).await
    }

    #[instrument(skip(self))]
    pub async fn delete_by_store(&self, store_id: StoreId) -> Result<usize, GroupError> {
        debug!("Sending request");
        self.inner
            .delete_where(GroupFilter::ByStore(store_id))
            .await
            .map_err(GroupError::from)
    }
}
