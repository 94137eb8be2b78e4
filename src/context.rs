//! Service context for CoinPulse desktop.
//!
//! The services are opened once in [`App`](crate::app::App) and shared with
//! every component via use_context. Watch channels from the core are bridged
//! into signals there, so components only ever read signals.
//!
//! ## Usage
//!
//! ```ignore
//! let services = use_services();
//! if let Some(services) = services() {
//!     services.app.session().logout()?;
//! }
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use coinpulse_core::{ChatClient, CoinPulse, LiveDataController, MarketFeed, View};
use dioxus::prelude::*;

use crate::app::Route;

/// Everything a page may need from the core.
#[derive(Clone)]
pub struct Services {
    pub app: Arc<CoinPulse>,
    pub live: Arc<LiveDataController>,
    pub chat: ChatClient,
}

/// Get the data directory for the application.
/// Uses the global data dir set from command line args.
pub fn get_data_dir() -> PathBuf {
    crate::get_data_dir()
}

/// Hook to access the services. `None` until startup has finished.
pub fn use_services() -> Signal<Option<Services>> {
    use_context::<Signal<Option<Services>>>()
}

/// Hook to access the current view. `None` until startup has finished.
pub fn use_view() -> Signal<Option<View>> {
    use_context::<Signal<Option<View>>>()
}

/// Hook to access the latest market feed.
pub fn use_feed() -> Signal<MarketFeed> {
    use_context::<Signal<MarketFeed>>()
}

pub fn route_for(view: View) -> Route {
    match view {
        View::Login => Route::Login {},
        View::Dashboard => Route::Dashboard {},
        View::Offline => Route::Offline {},
    }
}

/// Keep the current page in sync with the view.
///
/// A page calls this with the view it renders; whenever the view changes to
/// something else the router is sent to the matching page.
pub fn use_view_guard(page: View) {
    let navigator = use_navigator();
    let view = use_view();

    use_effect(move || {
        if let Some(current) = view() {
            if current != page {
                tracing::debug!(?current, ?page, "Redirecting to current view");
                navigator.replace(route_for(current));
            }
        }
    });
}
