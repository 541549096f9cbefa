//! [`TableRow`] implementation for [`Group`].

use crate::clients::StoreClient;
use crate::group_table::GroupError;
use crate::model::{Group, GroupCreate, GroupFilter, GroupId};
use async_trait::async_trait;
use table_actor::{TableAccess, TableRow};

#[async_trait]
impl TableRow for Group {
    type Id = GroupId;
    type Create = GroupCreate;
    type Update = ();
    type Filter = GroupFilter;
    type Context = StoreClient;
    type Error = GroupError;

    fn from_create(id: GroupId, params: GroupCreate) -> Result<Self, GroupError> {
        Ok(Self {
            id,
            store_id: params.store_id,
            order_date: params.order_date,
            end_time: params.end_time,
            name: params
                .name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
        })
    }

    fn id(&self) -> GroupId {
        self.id
    }

    fn matches(&self, filter: &GroupFilter) -> bool {
        match filter {
            GroupFilter::OnDate(date) => self.order_date == *date,
            GroupFilter::ByStore(store_id) => self.store_id == *store_id,
        }
    }

    async fn on_create(&mut self, stores: &StoreClient) -> Result<(), GroupError> {
        if stores.get(self.store_id).await?.is_none() {
            return Err(GroupError::MissingStore(self.store_id.to_string()));
        }
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _stores: &StoreClient) -> Result<(), GroupError> {
        Ok(())
    }
}
