use crate::model::{GroupId, GroupWithStore, Order, Product, Store};
use crate::ordering::{totals, Countdown, SummaryItem, SummaryTotals};

/// Everything the ordering page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    /// All stores, ascending id. Feeds the "start a group" picker.
    pub stores: Vec<Store>,
    /// Groups opened today, ascending id, each joined with its store.
    pub today_groups: Vec<GroupWithStore>,
    pub active_group_id: Option<GroupId>,
    /// Menu of the active group's store, cheapest first.
    pub menu: Vec<Product>,
    /// Orders of the active group, newest first.
    pub orders: Vec<Order>,
    pub summary: Vec<SummaryItem>,
    pub countdown: Countdown,
    pub expired: bool,
    /// True until today's groups have been fetched once.
    pub loading: bool,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            stores: Vec::new(),
            today_groups: Vec::new(),
            active_group_id: None,
            menu: Vec::new(),
            orders: Vec::new(),
            summary: Vec::new(),
            countdown: Countdown::Pending,
            expired: false,
            loading: true,
        }
    }
}

impl BoardState {
    pub fn active_group(&self) -> Option<&GroupWithStore> {
        let id = self.active_group_id?;
        self.find_group(id)
    }

    pub fn find_group(&self, id: GroupId) -> Option<&GroupWithStore> {
        self.today_groups.iter().find(|entry| entry.group.id == id)
    }

    pub fn totals(&self) -> SummaryTotals {
        totals(&self.summary)
    }

    /// Forget the active group and everything loaded for it.
    pub(super) fn clear_active(&mut self) {
        self.active_group_id = None;
        self.menu.clear();
        self.orders.clear();
        self.summary.clear();
        self.countdown = Countdown::Pending;
        self.expired = false;
    }
}
