//! Offline page - shown while the network is unreachable.
//!
//! The session is untouched; once connectivity returns the dashboard comes
//! back on its own.

use coinpulse_core::View;
use dioxus::prelude::*;

use crate::components::OfflineGame;
use crate::context::use_view_guard;

#[component]
pub fn Offline() -> Element {
    use_view_guard(View::Offline);

    rsx! {
        section { class: "offline-page",
            h2 { class: "page-title", "You are offline" }
            p { class: "body-text",
                "Check your connection. Prices will come back as soon as it returns."
            }
            OfflineGame {}
        }
    }
}
