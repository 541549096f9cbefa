use crate::board::BoardState;
use crate::clients::{GroupClient, OrderClient, ProductClient, StoreClient};
use crate::clock::Clock;
use crate::config::Config;
use crate::error::AppError;
use crate::lifecycle::Backend;
use crate::model::{GroupCreate, GroupId, GroupWithStore, OrderCreate, OrderId, StoreId};
use crate::order_table::OrderError;
use crate::ordering::{deadline_text, is_expired, select_active_group, summarize, Countdown};
use crate::report::render_summary;
use crate::share::share_link;
use crate::store_table::StoreError;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use table_actor::TableAccess;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Largest quantity one order may carry.
pub const MAX_QUANTITY: u32 = 999;

/// Settings the board reads from [`Config`].
#[derive(Debug, Clone)]
struct BoardSettings {
    utc_offset_minutes: i32,
    share_base_url: String,
    app_url: String,
}

/// The ordering page.
///
/// Holds the page's [`BoardState`] and the operations a visitor can run against it. Cloning is
/// cheap and clones share one state, which is how [`Subscriptions`](crate::board::Subscriptions)
/// keeps the page fresh in the background.
///
/// # Locking
/// The state lock is never held across a table call. Each operation reads what it needs, calls
/// the tables, then writes the result back. A refresh that finishes after the visitor switched
/// groups is discarded.
#[derive(Clone)]
pub struct GroupBoard {
    pub(super) stores: StoreClient,
    pub(super) products: ProductClient,
    pub(super) groups: GroupClient,
    pub(super) orders: OrderClient,
    clock: Arc<dyn Clock>,
    settings: BoardSettings,
    state: Arc<RwLock<BoardState>>,
}

impl GroupBoard {
    pub fn new(backend: &Backend, clock: Arc<dyn Clock>, config: &Config) -> Self {
        Self {
            stores: backend.stores.clone(),
            products: backend.products.clone(),
            groups: backend.groups.clone(),
            orders: backend.orders.clone(),
            clock,
            settings: BoardSettings {
                utc_offset_minutes: config.utc_offset_minutes,
                share_base_url: config.share_base_url.clone(),
                app_url: config.app_url.clone(),
            },
            state: Arc::new(RwLock::new(BoardState::default())),
        }
    }

    pub async fn snapshot(&self) -> BoardState {
        self.state.read().await.clone()
    }

    /// Initial fetch: stores, then today's groups.
    pub async fn load(&self) -> Result<(), AppError> {
        self.refresh_stores().await?;
        self.refresh_today_groups().await
    }

    /// Re-fetches all stores and updates the store copies held by today's groups.
    pub async fn refresh_stores(&self) -> Result<(), AppError> {
        let stores = self.stores.list_stores().await?;
        debug!(count = stores.len(), "Stores refreshed");
        let mut state = self.state.write().await;
        for entry in &mut state.today_groups {
            if let Some(store) = stores.iter().find(|store| store.id == entry.group.store_id) {
                entry.store = store.clone();
            }
        }
        state.stores = stores;
        Ok(())
    }

    /// Re-fetches today's groups and re-selects the active one.
    ///
    /// The active group is kept while it is still open today; otherwise the page moves to the
    /// oldest group, or clears itself when there is none.
    #[instrument(skip(self))]
    pub async fn refresh_today_groups(&self) -> Result<(), AppError> {
        let today = self.clock.today(self.settings.utc_offset_minutes);
        let groups = self.groups.on_date(today).await?;
        let stores: HashMap<StoreId, _> = self
            .stores
            .list_stores()
            .await?
            .into_iter()
            .map(|store| (store.id, store))
            .collect();

        let mut joined = Vec::with_capacity(groups.len());
        for group in groups {
            match stores.get(&group.store_id) {
                Some(store) => joined.push(GroupWithStore {
                    store: store.clone(),
                    group,
                }),
                None => warn!(group_id = %group.id, store_id = %group.store_id, "Group without store skipped"),
            }
        }

        let ids: Vec<GroupId> = joined.iter().map(|entry| entry.group.id).collect();
        let (previous, next) = {
            let mut state = self.state.write().await;
            let previous = state.active_group_id;
            let next = select_active_group(&ids, previous);
            state.today_groups = joined;
            state.loading = false;
            if next.is_none() {
                state.clear_active();
            }
            (previous, next)
        };
        debug!(%today, count = ids.len(), ?previous, ?next, "Today's groups refreshed");

        match next {
            None => Ok(()),
            Some(id) if Some(id) == previous => {
                self.refresh_orders().await?;
                self.tick().await;
                Ok(())
            }
            Some(id) => self.switch_group(id).await,
        }
    }

    /// Makes `group_id` the active group and loads its menu and orders.
    #[instrument(skip(self))]
    pub async fn switch_group(&self, group_id: GroupId) -> Result<(), AppError> {
        let store_id = {
            let mut state = self.state.write().await;
            let store_id = state
                .find_group(group_id)
                .map(|entry| entry.group.store_id)
                .ok_or_else(|| AppError::UnknownGroup(group_id.to_string()))?;
            if state.active_group_id != Some(group_id) {
                state.clear_active();
                state.active_group_id = Some(group_id);
            }
            store_id
        };
        info!(%group_id, %store_id, "Active group switched");

        let mut menu = self.products.menu(store_id).await?;
        menu.sort_by(|a, b| a.price.total_cmp(&b.price));
        {
            let mut state = self.state.write().await;
            if state.active_group_id == Some(group_id) {
                state.menu = menu;
            }
        }

        self.refresh_orders().await?;
        self.tick().await;
        Ok(())
    }

    /// Re-fetches the active group's orders and recomputes the summary.
    pub async fn refresh_orders(&self) -> Result<(), AppError> {
        let Some(group_id) = self.state.read().await.active_group_id else {
            return Ok(());
        };

        let mut orders = self.orders.for_group(group_id).await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let summary = summarize(&orders);

        let mut state = self.state.write().await;
        if state.active_group_id == Some(group_id) {
            debug!(%group_id, count = orders.len(), "Orders refreshed");
            state.orders = orders;
            state.summary = summary;
        }
        Ok(())
    }

    /// Re-evaluates the countdown of the active group.
    pub async fn tick(&self) -> Countdown {
        let now = self.clock.now();
        let mut state = self.state.write().await;
        let countdown = match state.active_group() {
            Some(entry) => Countdown::at(entry.group.end_time, now),
            None => Countdown::Pending,
        };
        if countdown.is_closed() && !state.expired {
            info!(group_id = ?state.active_group_id, "Group closed for ordering");
        }
        state.countdown = countdown;
        state.expired = countdown.is_closed();
        countdown
    }

    /// Places an order in the active group.
    #[instrument(skip(self))]
    pub async fn create_order(
        &self,
        item_name: &str,
        price: f64,
        quantity: u32,
        customer_name: &str,
    ) -> Result<OrderId, AppError> {
        let customer_name = customer_name.trim();
        if customer_name.is_empty() {
            return Err(AppError::Validation("Please enter your name".to_string()));
        }
        if item_name.trim().is_empty() {
            return Err(AppError::Validation("Please choose an item".to_string()));
        }
        if quantity == 0 {
            return Err(AppError::Validation(
                "Quantity must be at least 1".to_string(),
            ));
        }
        if quantity > MAX_QUANTITY {
            return Err(AppError::Validation(format!(
                "Quantity must be at most {}",
                MAX_QUANTITY
            )));
        }

        let (group_id, end_time) = {
            let state = self.state.read().await;
            let entry = state.active_group().ok_or(AppError::NoActiveGroup)?;
            (entry.group.id, entry.group.end_time)
        };
        self.ensure_open(end_time).await?;

        let order_id = self
            .orders
            .place_order(OrderCreate {
                group_id,
                item_name: item_name.to_string(),
                price,
                quantity,
                customer_name: customer_name.to_string(),
            })
            .await?;
        info!(%order_id, %group_id, "Order placed");

        self.refresh_orders().await?;
        Ok(order_id)
    }

    /// Cancels an order.
    ///
    /// `typed_name` must match the purchaser name on the order. This only guards against
    /// deleting someone else's line by accident; it is not an access control.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, order_id: OrderId, typed_name: &str) -> Result<(), AppError> {
        let order = self
            .orders
            .get(order_id)
            .await?
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;

        let end_time = self.group_deadline(order.group_id).await?;
        self.ensure_open(end_time).await?;

        if typed_name.trim() != order.customer_name {
            return Err(AppError::NameMismatch);
        }

        self.orders.delete(order_id).await?;
        info!(%order_id, group_id = %order.group_id, "Order deleted");

        self.refresh_orders().await
    }

    /// Opens a group for `store_id` today.
    #[instrument(skip(self))]
    pub async fn create_group(
        &self,
        store_id: StoreId,
        end_time: DateTime<Utc>,
        name: Option<String>,
    ) -> Result<GroupId, AppError> {
        if self.stores.get(store_id).await?.is_none() {
            return Err(StoreError::NotFound(store_id.to_string()).into());
        }
        if is_expired(end_time, self.clock.now()) {
            return Err(AppError::Validation(
                "Deadline must be in the future".to_string(),
            ));
        }

        let group_id = self
            .groups
            .open_group(GroupCreate {
                store_id,
                order_date: self.clock.today(self.settings.utc_offset_minutes),
                end_time,
                name: name.filter(|name| !name.trim().is_empty()),
            })
            .await?;
        info!(%group_id, %store_id, "Group opened");

        self.refresh_today_groups().await?;
        Ok(group_id)
    }

    /// Ends the active group: its orders go first, then the group. No-op without an active group.
    #[instrument(skip(self))]
    pub async fn close_group(&self) -> Result<(), AppError> {
        let Some(group_id) = self.state.read().await.active_group_id else {
            return Ok(());
        };

        if let Err(e) = self.orders.delete_by_group(group_id).await {
            warn!(%group_id, error = %e, "Deleting orders of closed group failed");
        }
        self.groups.delete(group_id).await?;
        info!(%group_id, "Group closed");

        self.refresh_today_groups().await
    }

    /// Link that shares the active group in the messaging app.
    pub async fn share_link(&self) -> Result<String, AppError> {
        let state = self.state.read().await;
        let entry = state.active_group().ok_or(AppError::NoActiveGroup)?;
        Ok(share_link(
            &self.settings.share_base_url,
            entry.title(),
            &deadline_text(entry.group.end_time, self.settings.utc_offset_minutes),
            &self.settings.app_url,
        ))
    }

    /// Printable summary of the active group.
    pub async fn summary_report(&self) -> Result<String, AppError> {
        let state = self.state.read().await;
        let entry = state.active_group().ok_or(AppError::NoActiveGroup)?;
        Ok(render_summary(
            entry.title(),
            &deadline_text(entry.group.end_time, self.settings.utc_offset_minutes),
            &state.summary,
        ))
    }

    async fn group_deadline(&self, group_id: GroupId) -> Result<DateTime<Utc>, AppError> {
        if let Some(entry) = self.state.read().await.find_group(group_id) {
            return Ok(entry.group.end_time);
        }
        self.groups
            .get(group_id)
            .await?
            .map(|group| group.end_time)
            .ok_or_else(|| AppError::UnknownGroup(group_id.to_string()))
    }

    /// Refuses with [`AppError::Expired`] once the deadline has passed, and updates the page's
    /// countdown on the way.
    async fn ensure_open(&self, end_time: DateTime<Utc>) -> Result<(), AppError> {
        if is_expired(end_time, self.clock.now()) {
            self.tick().await;
            return Err(AppError::Expired);
        }
        Ok(())
    }
}
