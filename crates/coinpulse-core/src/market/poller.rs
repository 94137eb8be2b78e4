//! Periodic market refresh.
//!
//! ```text
//! MarketPoller::start()
//!   └── tokio task
//!       ├── tick (first one fires immediately, then every interval)
//!       ├── source.fetch_coins()
//!       │   ├── Ok  -> FeedBoard::record_success (list replaced wholesale)
//!       │   └── Err -> FeedBoard::record_failure (list untouched, error logged)
//!       └── exits when the PollerHandle is stopped or dropped
//! ```
//!
//! Fetches run one at a time inside the task. A slow fetch delays the next
//! tick instead of overlapping with it.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::CoinSource;
use crate::error::CoreError;
use crate::types::Coin;

/// Published poll state, updated after every poll.
#[derive(Debug, Clone, Default)]
pub struct MarketFeed {
    /// Last successfully fetched list, in provider order
    pub coins: Arc<Vec<Coin>>,
    /// Polls finished so far, successful or not
    pub completed_polls: u64,
    pub failed_polls: u64,
    /// Error text of the most recent poll, cleared by the next success
    pub last_error: Option<String>,
    /// When `coins` was last replaced
    pub updated_at: Option<DateTime<Utc>>,
}

/// Shared publisher for [`MarketFeed`].
///
/// Outlives individual pollers so the last-known-good list survives a
/// stop/start cycle.
#[derive(Clone)]
pub struct FeedBoard {
    tx: Arc<watch::Sender<MarketFeed>>,
}

impl Default for FeedBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedBoard {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(MarketFeed::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn subscribe(&self) -> watch::Receiver<MarketFeed> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> MarketFeed {
        self.tx.borrow().clone()
    }

    pub fn coins(&self) -> Arc<Vec<Coin>> {
        self.tx.borrow().coins.clone()
    }

    pub(crate) fn record_success(&self, coins: Vec<Coin>) {
        self.tx.send_modify(|feed| {
            feed.coins = Arc::new(coins);
            feed.completed_polls += 1;
            feed.last_error = None;
            feed.updated_at = Some(Utc::now());
        });
    }

    pub(crate) fn record_failure(&self, err: &CoreError) {
        self.tx.send_modify(|feed| {
            feed.completed_polls += 1;
            feed.failed_polls += 1;
            feed.last_error = Some(err.to_string());
        });
    }
}

/// Repeating fetcher bound to a source and a feed.
pub struct MarketPoller<S> {
    source: Arc<S>,
    board: FeedBoard,
    interval: Duration,
}

impl<S: CoinSource> MarketPoller<S> {
    pub fn new(source: Arc<S>, board: FeedBoard, interval: Duration) -> Self {
        Self {
            source,
            board,
            interval,
        }
    }

    /// Fetch now, then every interval, until the returned handle is stopped.
    pub fn start(&self) -> PollerHandle {
        let token = CancellationToken::new();
        let task = tokio::spawn(run_poll_loop(
            self.source.clone(),
            self.board.clone(),
            self.interval,
            token.clone(),
        ));
        info!(interval_ms = self.interval.as_millis() as u64, "Market poller started");
        PollerHandle {
            token,
            task: Some(task),
        }
    }
}

async fn run_poll_loop<S: CoinSource>(
    source: Arc<S>,
    board: FeedBoard,
    period: Duration,
    token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            result = source.fetch_coins() => result,
        };

        match result {
            Ok(coins) => {
                debug!(count = coins.len(), "Coin list replaced");
                board.record_success(coins);
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch coin data, keeping previous list");
                board.record_failure(&e);
            }
        }
    }

    debug!("Market poller stopped");
}

/// Handle to a running poller. Stopping or dropping it cancels the task,
/// including a fetch that is still in flight.
pub struct PollerHandle {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Cancel the poller. Idempotent.
    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancel and wait for the task to exit.
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
