//! Market data: the provider client and the periodic poller feeding the dashboard.

mod client;
mod poller;

use std::future::Future;

pub use client::MarketClient;
pub use poller::{FeedBoard, MarketFeed, MarketPoller, PollerHandle};

use crate::error::CoreResult;
use crate::types::Coin;

/// Anything that can produce the current coin listing.
///
/// [`MarketClient`] is the production source; tests script their own.
pub trait CoinSource: Send + Sync + 'static {
    fn fetch_coins(&self) -> impl Future<Output = CoreResult<Vec<Coin>>> + Send;
}
