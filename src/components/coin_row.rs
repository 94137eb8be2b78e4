//! One row of the coin table.

use coinpulse_core::{format_usd, Coin};
use dioxus::prelude::*;

#[component]
pub fn CoinRow(
    coin: Coin,
    /// Whether the assistant is currently focused on this coin
    #[props(default = false)]
    selected: bool,
    /// Called with the coin id when the row is clicked
    on_select: EventHandler<String>,
) -> Element {
    let change_class = if coin.is_falling() {
        "coin-change coin-change-down"
    } else {
        "coin-change coin-change-up"
    };
    let row_class = if selected { "coin-row coin-row-selected" } else { "coin-row" };
    let id = coin.id.clone();
    let symbol = coin.symbol.to_uppercase();
    let change = coin.change_label();
    let volume = format_usd(coin.total_volume);
    let market_cap = format_usd(coin.market_cap);

    rsx! {
        div {
            class: "{row_class}",
            onclick: move |_| on_select.call(id.clone()),

            div { class: "coin-identity",
                img { class: "coin-image", src: "{coin.image}", alt: "{coin.name}" }
                span { class: "coin-name", "{coin.name}" }
                span { class: "coin-symbol", "{symbol}" }
            }
            span { class: "coin-price", "${coin.current_price}" }
            span { class: "coin-volume", "${volume}" }
            span { class: "{change_class}", "{change}%" }
            span { class: "coin-market-cap", "Mkt Cap: ${market_cap}" }
        }
    }
}
