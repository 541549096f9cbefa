use crate::board::GroupBoard;
use std::fmt::Debug;
use std::time::Duration;
use table_actor::{Change, TableAccess};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Which part of the board a change feed refreshes.
#[derive(Debug, Clone, Copy)]
enum Refresh {
    Stores,
    Groups,
    Orders,
}

/// Background tasks that keep a [`GroupBoard`] current.
///
/// One listener per change feed (stores, groups, orders) re-fetches the affected collection on
/// every change, and a ticker re-evaluates the countdown. A lagged listener re-fetches as well,
/// since the refresh does not depend on which rows changed.
///
/// [`Subscriptions::stop`] cancels every task and waits for them; dropping without `stop` still
/// cancels.
pub struct Subscriptions {
    token: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

impl Subscriptions {
    /// Subscribes to the feeds and spawns the tasks. Must be called inside a Tokio runtime.
    pub fn start(board: GroupBoard, tick_interval: Duration) -> Self {
        let token = CancellationToken::new();

        let handles = vec![
            listen(
                token.clone(),
                board.stores.subscribe(),
                board.clone(),
                Refresh::Stores,
            ),
            listen(
                token.clone(),
                board.groups.subscribe(),
                board.clone(),
                Refresh::Groups,
            ),
            listen(
                token.clone(),
                board.orders.subscribe(),
                board.clone(),
                Refresh::Orders,
            ),
            ticker(token.clone(), board, tick_interval),
        ];
        info!(?tick_interval, "Subscriptions started");

        Self { token, handles }
    }

    pub async fn stop(mut self) {
        self.token.cancel();
        for handle in std::mem::take(&mut self.handles) {
            if let Err(e) = handle.await {
                warn!(error = %e, "Subscription task failed");
            }
        }
        info!("Subscriptions stopped");
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

fn listen<Id>(
    token: CancellationToken,
    mut changes: broadcast::Receiver<Change<Id>>,
    board: GroupBoard,
    target: Refresh,
) -> JoinHandle<()>
where
    Id: Clone + Debug + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            let received = tokio::select! {
                _ = token.cancelled() => break,
                received = changes.recv() => received,
            };
            match received {
                Ok(change) => debug!(?target, ?change, "Change received"),
                Err(RecvError::Lagged(skipped)) => warn!(?target, skipped, "Change feed lagged"),
                Err(RecvError::Closed) => break,
            }

            let result = match target {
                Refresh::Stores => board.refresh_stores().await,
                Refresh::Groups => board.refresh_today_groups().await,
                Refresh::Orders => board.refresh_orders().await,
            };
            if let Err(e) = result {
                warn!(?target, error = %e, "Refresh failed");
            }
        }
        debug!(?target, "Listener stopped");
    })
}

fn ticker(token: CancellationToken, board: GroupBoard, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = interval.tick() => {
                    board.tick().await;
                }
            }
        }
        debug!("Ticker stopped");
    })
}
