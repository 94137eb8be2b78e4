use std::sync::Arc;

use coinpulse_core::{CoinPulse, MarketFeed, View};
use dioxus::prelude::*;

use crate::context::{get_data_dir, use_services, use_view, Services};
use crate::pages::{Dashboard, Login, Offline};
use crate::theme::GLOBAL_STYLES;

/// Application routes.
///
/// - `/` - Live coin list with search and the assistant
/// - `/login` - Sign in
/// - `/offline` - Shown while the network is unreachable
#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/")]
        Dashboard {},
        #[route("/login")]
        Login {},
        #[route("/offline")]
        Offline {},
}

/// Root application component.
///
/// Provides global styles, service context, and routing.
#[component]
pub fn App() -> Element {
    let mut services: Signal<Option<Services>> = use_signal(|| None);
    let mut view: Signal<Option<View>> = use_signal(|| None);
    let mut feed: Signal<MarketFeed> = use_signal(MarketFeed::default);

    use_context_provider(|| services);
    use_context_provider(|| view);
    use_context_provider(|| feed);

    // Open the core on mount, then mirror its channels into signals
    use_effect(move || {
        spawn(async move {
            let app = match CoinPulse::open(get_data_dir()) {
                Ok(app) => app,
                Err(e) => {
                    tracing::error!("Failed to open CoinPulse: {}", e);
                    return;
                }
            };
            if let Err(e) = app.offline_cache().activate() {
                tracing::warn!("Failed to clean offline cache: {}", e);
            }

            let chat = match app.chat_client() {
                Ok(chat) => chat,
                Err(e) => {
                    tracing::error!("Failed to build chat client: {}", e);
                    return;
                }
            };
            let connectivity = app.connectivity().await;
            let live = match app.live(connectivity) {
                Ok(live) => live,
                Err(e) => {
                    tracing::error!("Failed to start live data: {}", e);
                    return;
                }
            };

            let mut view_rx = live.subscribe_view();
            let mut feed_rx = live.feed().subscribe();
            view.set(Some(*view_rx.borrow_and_update()));
            services.set(Some(Services {
                app: Arc::new(app),
                live: Arc::new(live),
                chat,
            }));
            tracing::info!("CoinPulse services ready");

            loop {
                tokio::select! {
                    changed = view_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        view.set(Some(*view_rx.borrow_and_update()));
                    }
                    changed = feed_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        feed.set(feed_rx.borrow_and_update().clone());
                    }
                }
            }
        });
    });

    rsx! {
        style { {GLOBAL_STYLES} }
        Router::<Route> {}
    }
}

/// Header plus the routed page.
#[component]
fn Shell() -> Element {
    let services = use_services();
    let view = use_view();

    let logout = move |_| {
        if let Some(services) = services() {
            if let Err(e) = services.app.session().logout() {
                tracing::error!("Logout failed: {}", e);
            }
        }
    };

    let (status_class, status_text) = match view() {
        Some(View::Offline) => ("status-dot status-offline", "Offline"),
        Some(_) => ("status-dot status-online", "Online"),
        None => ("status-dot", "Connecting"),
    };

    rsx! {
        div { class: "app-shell",
            header { class: "app-header",
                h1 { class: "app-title", "CoinPulse" }
                div { class: "app-header-right",
                    span { class: "{status_class}" }
                    span { class: "status-text", "{status_text}" }
                    if view() == Some(View::Dashboard) {
                        button { class: "btn-secondary", onclick: logout, "Log out" }
                    }
                }
            }

            main { class: "app-main",
                if services.read().is_some() {
                    Outlet::<Route> {}
                } else {
                    p { class: "loading", "Starting..." }
                }
            }
        }
    }
}
