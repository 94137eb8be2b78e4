//! Connectivity monitor.
//!
//! Holds a single online/offline flag driven by two signals, "became
//! reachable" and "became unreachable". Each signal writes the flag and
//! notifies subscribers, even if the value is unchanged; there is no
//! debouncing.
//!
//! In a desktop process the signals come from [`NetworkProbe`], a periodic
//! TCP connect to a well-known address. That only tells us whether the
//! local network can reach *something*; it says nothing about whether the
//! market provider itself is up. Poll failures cover that case separately.

use std::future::Future;
use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::ConnectivityConfig;

/// Environment-level reachability signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivitySignal {
    Online,
    Offline,
}

/// Something that can tell whether the network is currently reachable.
pub trait ReachabilityProbe: Send + Sync + 'static {
    fn is_reachable(&self) -> impl Future<Output = bool> + Send;
}

/// Probe that opens a TCP connection to a fixed address.
#[derive(Debug, Clone)]
pub struct NetworkProbe {
    addr: String,
    timeout: Duration,
}

impl NetworkProbe {
    pub fn new(addr: impl Into<String>, timeout: Duration) -> Self {
        Self {
            addr: addr.into(),
            timeout,
        }
    }

    pub fn from_config(config: &ConnectivityConfig) -> Self {
        Self::new(config.probe_addr.clone(), config.probe_timeout())
    }
}

impl ReachabilityProbe for NetworkProbe {
    fn is_reachable(&self) -> impl Future<Output = bool> + Send {
        async move {
            match tokio::time::timeout(self.timeout, TcpStream::connect(&self.addr)).await {
                Ok(Ok(_)) => true,
                Ok(Err(e)) => {
                    debug!(addr = %self.addr, error = %e, "Probe connect failed");
                    false
                }
                Err(_) => {
                    debug!(addr = %self.addr, "Probe timed out");
                    false
                }
            }
        }
    }
}

struct Inner {
    state: watch::Sender<bool>,
    probe_token: CancellationToken,
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.probe_token.cancel();
    }
}

/// Observable online/offline flag.
///
/// Clones share the flag. When the last clone is dropped the probe task,
/// if any, is cancelled.
#[derive(Clone)]
pub struct ConnectivityMonitor {
    inner: Arc<Inner>,
}

impl ConnectivityMonitor {
    /// Monitor without a probe; signals are fed through [`signal`](Self::signal).
    pub fn new(initially_online: bool) -> Self {
        let (state, _rx) = watch::channel(initially_online);
        Self {
            inner: Arc::new(Inner {
                state,
                probe_token: CancellationToken::new(),
            }),
        }
    }

    /// Monitor initialized from one probe run, then kept current by
    /// re-probing every `interval` and signalling on change.
    pub async fn with_probe<P: ReachabilityProbe>(probe: P, interval: Duration) -> Self {
        let online = probe.is_reachable().await;
        let monitor = Self::new(online);
        info!(online, "Connectivity monitor initialized");

        let weak = Arc::downgrade(&monitor.inner);
        let token = monitor.inner.probe_token.clone();
        tokio::spawn(run_probe_loop(probe, interval, online, weak, token));

        monitor
    }

    /// Feed an environment signal.
    pub fn signal(&self, signal: ConnectivitySignal) {
        let online = signal == ConnectivitySignal::Online;
        let was_online = self.inner.state.send_replace(online);
        match (was_online, online) {
            (true, false) => warn!("Connectivity lost"),
            (false, true) => info!("Connectivity restored"),
            _ => debug!(online, "Connectivity signal repeated"),
        }
    }

    pub fn is_online(&self) -> bool {
        *self.inner.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.state.subscribe()
    }
}

async fn run_probe_loop<P: ReachabilityProbe>(
    probe: P,
    period: Duration,
    mut last: bool,
    monitor: Weak<Inner>,
    token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; initialization already probed.
    ticker.tick().await;

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let reachable = tokio::select! {
            biased;
            _ = token.cancelled() => break,
            reachable = probe.is_reachable() => reachable,
        };

        if reachable == last {
            continue;
        }
        last = reachable;

        let Some(inner) = monitor.upgrade() else { break };
        ConnectivityMonitor { inner }.signal(if reachable {
            ConnectivitySignal::Online
        } else {
            ConnectivitySignal::Offline
        });
    }

    debug!("Connectivity probe stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Replays a sequence of probe answers, then repeats the last one.
    struct ScriptedProbe {
        answers: Mutex<VecDeque<bool>>,
        last: Mutex<bool>,
        calls: Arc<AtomicUsize>,
    }

    impl ScriptedProbe {
        fn new(answers: Vec<bool>) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let probe = Self {
                answers: Mutex::new(answers.into()),
                last: Mutex::new(true),
                calls: calls.clone(),
            };
            (probe, calls)
        }
    }

    impl ReachabilityProbe for ScriptedProbe {
        fn is_reachable(&self) -> impl Future<Output = bool> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut last = self.last.lock();
            if let Some(next) = self.answers.lock().pop_front() {
                *last = next;
            }
            std::future::ready(*last)
        }
    }

    #[test]
    fn test_signals_set_flag() {
        let monitor = ConnectivityMonitor::new(true);
        assert!(monitor.is_online());

        monitor.signal(ConnectivitySignal::Offline);
        assert!(!monitor.is_online());

        monitor.signal(ConnectivitySignal::Online);
        assert!(monitor.is_online());
    }

    #[test]
    fn test_every_signal_notifies() {
        let monitor = ConnectivityMonitor::new(true);
        let mut rx = monitor.subscribe();
        rx.borrow_and_update();

        // Same value still counts as a signal
        monitor.signal(ConnectivitySignal::Online);
        assert!(rx.has_changed().unwrap());
        assert!(*rx.borrow_and_update());

        monitor.signal(ConnectivitySignal::Offline);
        assert!(rx.has_changed().unwrap());
        assert!(!*rx.borrow_and_update());
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_initializes_and_tracks_changes() {
        let (probe, _calls) = ScriptedProbe::new(vec![false, false, true]);
        let monitor = ConnectivityMonitor::with_probe(probe, Duration::from_secs(3)).await;
        assert!(!monitor.is_online());

        let mut rx = monitor.subscribe();
        rx.wait_for(|online| *online).await.unwrap();
        assert!(monitor.is_online());
    }

    #[tokio::test(start_paused = true)]
    async fn test_probe_signals_only_on_change() {
        let (probe, calls) = ScriptedProbe::new(vec![true, true, true, false]);
        let monitor = ConnectivityMonitor::with_probe(probe, Duration::from_secs(1)).await;
        let mut rx = monitor.subscribe();
        rx.borrow_and_update();

        // Unchanged answers produce no signal
        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(!rx.has_changed().unwrap());

        rx.wait_for(|online| !*online).await.unwrap();
        assert!(!monitor.is_online());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_monitor_stops_probe() {
        let (probe, calls) = ScriptedProbe::new(vec![true]);
        let monitor = ConnectivityMonitor::with_probe(probe, Duration::from_secs(1)).await;
        tokio::time::sleep(Duration::from_millis(1500)).await;
        drop(monitor);

        let seen = calls.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(calls.load(Ordering::SeqCst), seen);
    }
}
