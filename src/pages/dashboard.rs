//! Dashboard page - the live coin list.
//!
//! The list comes from the market feed and is replaced wholesale on every
//! successful poll. Search narrows it by name without touching the feed.

use coinpulse_core::{filter_coins, View};
use dioxus::prelude::*;

use crate::components::{Chatbot, CoinRow};
use crate::context::{use_feed, use_view_guard};

#[component]
pub fn Dashboard() -> Element {
    use_view_guard(View::Dashboard);

    let feed = use_feed();
    let mut search = use_signal(String::new);
    let mut selected = use_signal(|| None::<String>);

    let snapshot = feed();
    let query = search();
    let coins = filter_coins(&snapshot.coins, &query);
    let updated = snapshot
        .updated_at
        .map(|t| t.with_timezone(&chrono::Local).format("%H:%M:%S").to_string());

    rsx! {
        section { class: "dashboard",
            div { class: "dashboard-toolbar",
                h2 { class: "page-title", "Markets" }
                input {
                    class: "text-input search-input",
                    r#type: "text",
                    placeholder: "Search",
                    value: "{query}",
                    oninput: move |e| search.set(e.value()),
                }
                if let Some(time) = updated {
                    span { class: "updated-at", "Updated {time}" }
                }
            }

            if snapshot.completed_polls == 0 {
                p { class: "loading", "Loading prices..." }
            } else if coins.is_empty() {
                p { class: "empty-state", "No coins match \"{query}\"" }
            } else {
                div { class: "coin-table",
                    for coin in coins {
                        CoinRow {
                            key: "{coin.id}",
                            coin: coin.clone(),
                            selected: selected().as_deref() == Some(coin.id.as_str()),
                            on_select: move |id: String| {
                                let next = if selected().as_deref() == Some(id.as_str()) {
                                    None
                                } else {
                                    Some(id)
                                };
                                selected.set(next);
                            },
                        }
                    }
                }
            }

            Chatbot { coin_id: selected() }
        }
    }
}
