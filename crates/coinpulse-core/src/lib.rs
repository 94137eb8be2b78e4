//! CoinPulse Core Library
//!
//! Live cryptocurrency prices for signed-in users, with an offline fallback.
//!
//! ## Overview
//!
//! A dashboard polls a public market-data provider every few seconds and
//! shows the top coins by market cap, filterable by name. A session gate
//! keeps the dashboard behind a stored credential. When the network goes
//! away the app switches to an offline screen with a small jump-the-obstacle
//! game, and switches back when it returns.
//!
//! ## Pieces
//!
//! - [`SessionStore`]: durable auth token plus observable session
//! - [`market`]: provider client and the cancellable poller
//! - [`ConnectivityMonitor`]: online/offline flag fed by a network probe
//! - [`LiveDataController`]: picks the [`View`] and runs the poller only
//!   while online and signed in
//! - [`game`]: the offline mini-game as a fixed-tick simulation
//! - [`chat`]: question/answer client for the assistant backend
//! - [`offline`]: versioned asset cache for the offline page
//!
//! ## Quick Start
//!
//! ```ignore
//! use coinpulse_core::{filter_coins, CoinPulse};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let app = CoinPulse::open("~/.local/share/coinpulse")?;
//!     app.session().login("mock-oauth-token")?;
//!
//!     let connectivity = app.connectivity().await;
//!     let live = app.live(connectivity)?;
//!
//!     let mut feed = live.feed().subscribe();
//!     feed.changed().await?;
//!     for coin in filter_coins(&feed.borrow().coins, "eth") {
//!         println!("{} {}", coin.name, coin.current_price);
//!     }
//!
//!     live.shutdown().await;
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod config;
pub mod connectivity;
pub mod controller;
pub mod engine;
pub mod error;
pub mod filter;
pub mod game;
pub mod logging;
pub mod market;
pub mod offline;
pub mod session;
pub mod storage;
pub mod types;

// Re-exports
pub use chat::{ChatBackend, ChatClient, ChatReply, ChatRequest, Conversation};
pub use config::{default_data_dir, AppConfig, ChatConfig, ConnectivityConfig, MarketConfig};
pub use connectivity::{ConnectivityMonitor, ConnectivitySignal, NetworkProbe, ReachabilityProbe};
pub use controller::LiveDataController;
pub use engine::CoinPulse;
pub use error::{CoreError, CoreResult};
pub use filter::filter_coins;
pub use game::{GameEvent, GameLoop, GameState, Phase, TickInput};
pub use market::{CoinSource, FeedBoard, MarketClient, MarketFeed, MarketPoller, PollerHandle};
pub use offline::{AssetSource, HttpAssetSource, OfflineCache};
pub use session::{mock_credential, SessionStore};
pub use storage::Storage;
pub use types::*;
