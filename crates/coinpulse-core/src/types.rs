//! Core data types shared across CoinPulse.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// One priced asset record as returned by the market-data provider.
///
/// Records are immutable snapshots; every poll replaces the whole list and
/// nothing but `id` links a coin across polls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    /// Stable provider identifier (e.g. "bitcoin")
    pub id: String,
    /// Display name (e.g. "Bitcoin")
    pub name: String,
    /// Ticker symbol, lowercase as the provider sends it (e.g. "btc")
    pub symbol: String,
    /// Logo URL
    #[serde(default)]
    pub image: String,
    /// Price in USD
    #[serde(default, deserialize_with = "null_as_zero")]
    pub current_price: f64,
    /// Market capitalisation in USD
    #[serde(default, deserialize_with = "null_as_zero")]
    pub market_cap: f64,
    /// 24h traded volume in USD
    #[serde(default, deserialize_with = "null_as_zero")]
    pub total_volume: f64,
    /// Signed 24h price change in percent
    #[serde(default, deserialize_with = "null_as_zero")]
    pub price_change_percentage_24h: f64,
}

impl Coin {
    /// Whether the 24h change is negative (rendered red).
    pub fn is_falling(&self) -> bool {
        self.price_change_percentage_24h < 0.0
    }

    /// 24h change formatted with two decimals, e.g. "-1.24".
    pub fn change_label(&self) -> String {
        format!("{:.2}", self.price_change_percentage_24h)
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

/// Format a USD amount with thousands separators, e.g. `1234567.0` -> "1,234,567".
pub fn format_usd(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{}", rounded.abs() as u128);

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    if negative {
        format!("-{}", out)
    } else {
        out
    }
}

/// The authenticated-user marker derived from a stored credential.
///
/// The token is opaque: it is never decoded, verified or checked for expiry.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    token: String,
}

impl Session {
    pub(crate) fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The raw credential, for forwarding as a bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// First characters of the token, safe to print.
    pub fn preview(&self) -> String {
        let prefix: String = self.token.chars().take(6).collect();
        format!("{}…", prefix)
    }
}

impl fmt::Debug for Session {
    // Keep credentials out of logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &format_args!("{}", self.preview()))
            .finish()
    }
}

/// Speaker of a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One message in a chat conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Which top-level view the application should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// No session: the user must sign in
    Login,
    /// Online and signed in: live coin list
    Dashboard,
    /// Connectivity lost: offline page with the mini-game
    Offline,
}

impl View {
    /// Derive the view from connectivity and session state.
    ///
    /// Connectivity wins: the offline page needs no session, and the session
    /// is left untouched while offline.
    pub fn derive(online: bool, authenticated: bool) -> Self {
        match (online, authenticated) {
            (false, _) => View::Offline,
            (true, true) => View::Dashboard,
            (true, false) => View::Login,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_deserializes_provider_record() {
        let json = r#"{
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://assets.example/bitcoin.png",
            "current_price": 67012.5,
            "market_cap": 1320000000000,
            "market_cap_rank": 1,
            "total_volume": 28000000000,
            "price_change_percentage_24h": -1.2345,
            "roi": null
        }"#;

        let coin: Coin = serde_json::from_str(json).unwrap();
        assert_eq!(coin.id, "bitcoin");
        assert_eq!(coin.name, "Bitcoin");
        assert_eq!(coin.current_price, 67012.5);
        assert!(coin.is_falling());
        assert_eq!(coin.change_label(), "-1.23");
    }

    #[test]
    fn test_coin_null_numbers_become_zero() {
        let json = r#"{
            "id": "newcoin", "symbol": "new", "name": "New Coin",
            "image": "", "current_price": null, "market_cap": null,
            "total_volume": 5, "price_change_percentage_24h": null
        }"#;

        let coin: Coin = serde_json::from_str(json).unwrap();
        assert_eq!(coin.current_price, 0.0);
        assert_eq!(coin.market_cap, 0.0);
        assert_eq!(coin.total_volume, 5.0);
        assert!(!coin.is_falling());
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0), "0");
        assert_eq!(format_usd(999.4), "999");
        assert_eq!(format_usd(1000.0), "1,000");
        assert_eq!(format_usd(1_320_000_000_000.0), "1,320,000,000,000");
        assert_eq!(format_usd(-12_345.0), "-12,345");
    }

    #[test]
    fn test_session_debug_hides_token() {
        let session = Session::new("eyJhbGciOiJSUzI1NiJ9.secret.signature");
        let debug = format!("{:?}", session);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("eyJhbG"));
    }

    #[test]
    fn test_chat_role_serializes_lowercase() {
        let turn = ChatTurn::assistant("hi");
        let json = serde_json::to_string(&turn).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }

    #[test]
    fn test_view_derivation() {
        assert_eq!(View::derive(true, true), View::Dashboard);
        assert_eq!(View::derive(true, false), View::Login);
        assert_eq!(View::derive(false, true), View::Offline);
        assert_eq!(View::derive(false, false), View::Offline);
    }
}
