#![allow(non_snake_case)]

mod app;
mod components;
pub mod context;
mod pages;
mod theme;

use std::path::PathBuf;
use std::sync::OnceLock;

use clap::Parser;
use coinpulse_core::logging::LoggingBuilder;
use dioxus::desktop::{Config, WindowBuilder};

/// Global data directory, set from command line
static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Get the data directory (set from command line or default)
pub fn get_data_dir() -> PathBuf {
    DATA_DIR
        .get()
        .cloned()
        .unwrap_or_else(coinpulse_core::default_data_dir)
}

/// CoinPulse - Live Crypto Prices
#[derive(Parser, Debug)]
#[command(name = "coinpulse-desktop")]
#[command(about = "CoinPulse - Live crypto prices with an offline fallback")]
struct Args {
    /// Data directory for the session store, config and logs
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log: String,
}

fn main() {
    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(coinpulse_core::default_data_dir);

    if let Err(e) = LoggingBuilder::new(data_dir.join("logs"), "desktop")
        .with_filter(args.log)
        .init()
    {
        eprintln!("Failed to set up file logging: {}", e);
    }

    let _ = DATA_DIR.set(data_dir.clone());
    tracing::info!(?data_dir, "Starting CoinPulse desktop");

    let config = Config::new().with_window(
        WindowBuilder::new()
            .with_title("CoinPulse")
            .with_inner_size(dioxus::desktop::LogicalSize::new(1000.0, 800.0))
            .with_resizable(true),
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .launch(app::App);
}
