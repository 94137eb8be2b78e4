//! HTTP client for the coin-listing endpoint.

use std::future::Future;

use reqwest::StatusCode;
use tracing::debug;

use super::CoinSource;
use crate::config::MarketConfig;
use crate::error::{CoreError, CoreResult};
use crate::types::Coin;

const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Client for the provider's `/coins/markets` listing.
#[derive(Clone)]
pub struct MarketClient {
    http: reqwest::Client,
    config: MarketConfig,
}

impl MarketClient {
    pub fn new(config: MarketConfig) -> CoreResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("coinpulse/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    /// Endpoint URL without the query string.
    pub fn markets_url(&self) -> String {
        format!("{}/coins/markets", self.config.base_url.trim_end_matches('/'))
    }

    /// Query parameters selecting currency, ordering and page.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("vs_currency", self.config.vs_currency.clone()),
            ("order", self.config.order.clone()),
            ("per_page", self.config.per_page.to_string()),
            ("page", self.config.page.to_string()),
            ("sparkline", self.config.sparkline.to_string()),
        ]
    }

    /// Fetch one page of coins, in provider order.
    pub async fn fetch_markets(&self) -> CoreResult<Vec<Coin>> {
        let mut request = self.http.get(self.markets_url()).query(&self.query_params());
        if let Some(ref key) = self.config.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(CoreError::MarketApi(
                "Rate limit exceeded. Please try again later.".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(CoreError::MarketApi(format!("provider returned {}", status)));
        }

        let coins: Vec<Coin> = response.json().await?;
        debug!(count = coins.len(), "Fetched market listing");
        Ok(coins)
    }
}

impl CoinSource for MarketClient {
    fn fetch_coins(&self) -> impl Future<Output = CoreResult<Vec<Coin>>> + Send {
        self.fetch_markets()
    }
}
