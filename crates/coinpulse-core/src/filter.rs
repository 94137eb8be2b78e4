//! Search filter over the coin list.

use crate::types::Coin;

/// Coins whose name contains `query`, ignoring case, in input order.
///
/// An empty query keeps every coin.
pub fn filter_coins<'a>(coins: &'a [Coin], query: &str) -> Vec<&'a Coin> {
    if query.is_empty() {
        return coins.iter().collect();
    }

    let needle = query.to_lowercase();
    coins
        .iter()
        .filter(|coin| coin.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(id: &str, name: &str) -> Coin {
        Coin {
            id: id.to_string(),
            name: name.to_string(),
            symbol: id.to_string(),
            image: String::new(),
            current_price: 1.0,
            market_cap: 1.0,
            total_volume: 1.0,
            price_change_percentage_24h: 0.0,
        }
    }

    fn names<'a>(coins: &[&'a Coin]) -> Vec<&'a str> {
        coins.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_query_matches_case_insensitively() {
        let coins = vec![coin("bitcoin", "Bitcoin"), coin("ethereum", "Ethereum")];
        let result = filter_coins(&coins, "eth");
        assert_eq!(names(&result), vec!["Ethereum"]);

        let result = filter_coins(&coins, "BIT");
        assert_eq!(names(&result), vec!["Bitcoin"]);
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let coins = vec![coin("a", "Alpha"), coin("b", "Beta")];
        let result = filter_coins(&coins, "");
        assert_eq!(names(&result), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let coins = vec![coin("a", "Alpha")];
        assert!(filter_coins(&coins, "zzz").is_empty());
        assert!(filter_coins(&[], "alpha").is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let coins = vec![
            coin("wbtc", "Wrapped Bitcoin"),
            coin("eth", "Ethereum"),
            coin("btc", "Bitcoin"),
            coin("bch", "Bitcoin Cash"),
        ];
        let result = filter_coins(&coins, "bitcoin");
        assert_eq!(
            names(&result),
            vec!["Wrapped Bitcoin", "Bitcoin", "Bitcoin Cash"]
        );
    }

    #[test]
    fn test_symbol_is_not_searched() {
        let coins = vec![coin("btc", "Bitcoin")];
        assert!(filter_coins(&coins, "btc").is_empty());
    }

    #[test]
    fn test_whitespace_query_is_literal() {
        let coins = vec![coin("bch", "Bitcoin Cash"), coin("btc", "Bitcoin")];
        let result = filter_coins(&coins, " ");
        assert_eq!(names(&result), vec!["Bitcoin Cash"]);
    }
}
