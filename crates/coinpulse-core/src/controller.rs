//! Live data controller: decides which screen is shown and keeps the
//! market poller running exactly while it is useful.
//!
//! ```text
//! SessionStore ──┐
//!                ├── supervisor task ──► View (watch)
//! Connectivity ──┘        │
//!                         └── MarketPoller start/stop ──► FeedBoard
//! ```
//!
//! The poller runs iff the process is online and a session exists. Going
//! offline stops it; coming back starts a fresh one, which fetches
//! immediately. The [`FeedBoard`] is owned here, not by the poller, so the
//! last good coin list stays visible across those restarts.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::connectivity::ConnectivityMonitor;
use crate::market::{CoinSource, FeedBoard, MarketPoller, PollerHandle};
use crate::session::SessionStore;
use crate::types::{Session, View};

pub struct LiveDataController {
    session: SessionStore,
    connectivity: ConnectivityMonitor,
    board: FeedBoard,
    view: Arc<watch::Sender<View>>,
    polling: Arc<AtomicBool>,
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl LiveDataController {
    /// Start supervising. Must be called inside a tokio runtime.
    pub fn new<S: CoinSource>(
        session: SessionStore,
        connectivity: ConnectivityMonitor,
        source: Arc<S>,
        poll_interval: Duration,
    ) -> Self {
        let board = FeedBoard::new();
        let initial = View::derive(connectivity.is_online(), session.is_authenticated());
        let (view_tx, _rx) = watch::channel(initial);
        let view = Arc::new(view_tx);
        let polling = Arc::new(AtomicBool::new(false));
        let token = CancellationToken::new();

        let supervisor = Supervisor {
            poller: MarketPoller::new(source, board.clone(), poll_interval),
            session_rx: session.subscribe(),
            online_rx: connectivity.subscribe(),
            view: view.clone(),
            polling: polling.clone(),
            running: None,
        };
        let task = tokio::spawn(supervisor.run(token.clone()));
        info!(view = ?initial, "Live data controller started");

        Self {
            session,
            connectivity,
            board,
            view,
            polling,
            token,
            task: Some(task),
        }
    }

    /// The screen to show right now.
    pub fn view(&self) -> View {
        View::derive(self.connectivity.is_online(), self.session.is_authenticated())
    }

    /// Notified after the supervisor has applied a change, so the poller
    /// is already started or stopped when a new view arrives.
    pub fn subscribe_view(&self) -> watch::Receiver<View> {
        self.view.subscribe()
    }

    pub fn feed(&self) -> &FeedBoard {
        &self.board
    }

    pub fn is_polling(&self) -> bool {
        self.polling.load(Ordering::SeqCst)
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn connectivity(&self) -> &ConnectivityMonitor {
        &self.connectivity
    }

    /// Stop the supervisor and the poller, waiting for both to exit.
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for LiveDataController {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

struct Supervisor<S> {
    poller: MarketPoller<S>,
    session_rx: watch::Receiver<Option<Session>>,
    online_rx: watch::Receiver<bool>,
    view: Arc<watch::Sender<View>>,
    polling: Arc<AtomicBool>,
    running: Option<PollerHandle>,
}

impl<S: CoinSource> Supervisor<S> {
    async fn run(mut self, token: CancellationToken) {
        loop {
            let online = *self.online_rx.borrow_and_update();
            let authenticated = self.session_rx.borrow_and_update().is_some();
            self.reconcile(online && authenticated).await;

            let view = View::derive(online, authenticated);
            self.view.send_if_modified(|current| {
                if *current == view {
                    return false;
                }
                debug!(from = ?*current, to = ?view, "View changed");
                *current = view;
                true
            });

            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                changed = self.session_rx.changed() => if changed.is_err() { break },
                changed = self.online_rx.changed() => if changed.is_err() { break },
            }
        }

        self.reconcile(false).await;
        debug!("Live data controller stopped");
    }

    async fn reconcile(&mut self, should_poll: bool) {
        match (should_poll, self.running.take()) {
            (true, None) => {
                self.running = Some(self.poller.start());
            }
            (false, Some(handle)) => {
                handle.shutdown().await;
                info!("Market poller paused");
            }
            (_, running) => self.running = running,
        }
        self.polling.store(self.running.is_some(), Ordering::SeqCst);
    }
}
