//! CoinPulse CLI
//!
//! Thin wrapper around coinpulse-core for command-line usage.
//!
//! ## Usage
//!
//! ```bash
//! # Show data directory, session and cache status
//! coinpulse info
//!
//! # Sign in with a credential (or a mock one)
//! coinpulse session login <token>
//! coinpulse session login --mock
//!
//! # One-shot price table, filtered by name
//! coinpulse prices --search eth --limit 10
//!
//! # Live table, refreshed every poll until Ctrl+C
//! coinpulse watch
//!
//! # Ask the assistant about a coin
//! coinpulse chat --coin bitcoin "How is it doing today?"
//!
//! # Store the offline page assets
//! coinpulse precache --origin http://localhost:3000
//!
//! # Play the offline game headless, or in real time
//! coinpulse play --auto --ticks 2000
//! coinpulse play --realtime
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use coinpulse_core::game::{autopilot_input, step, GameEvent, GameLoop, GameState, TickInput};
use coinpulse_core::logging::LoggingBuilder;
use coinpulse_core::{
    default_data_dir, filter_coins, format_usd, mock_credential, ChatRole, Coin, CoinPulse,
    MarketFeed, View,
};
use tokio::io::AsyncBufReadExt;
use tracing::{error, info};

/// CoinPulse - Live Crypto Prices
#[derive(Parser)]
#[command(name = "coinpulse")]
#[command(version = "0.1.0")]
#[command(about = "CoinPulse - Live Crypto Prices")]
#[command(
    long_about = "Live cryptocurrency prices for signed-in users, with an assistant and an offline mini-game."
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Data directory (default: <platform data dir>/coinpulse)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show data directory, session and offline cache status
    Info,

    /// Session management
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Fetch the market once and print the coin table
    Prices {
        /// Only show coins whose name contains this text
        #[arg(short, long, default_value = "")]
        search: String,

        /// Maximum rows to print
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Keep polling and reprint the table on every update
    Watch {
        /// Only show coins whose name contains this text
        #[arg(short, long, default_value = "")]
        search: String,

        /// Maximum rows to print
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Ask the crypto assistant
    Chat {
        /// Question to ask; omit for an interactive session
        message: Option<String>,

        /// Coin the question is about (e.g. "bitcoin")
        #[arg(short, long)]
        coin: Option<String>,
    },

    /// Fetch and store the offline page assets
    Precache {
        /// Origin serving the web assets
        #[arg(short, long, default_value = "http://localhost:3000")]
        origin: String,
    },

    /// Play the offline mini-game
    Play {
        /// Let the autopilot jump
        #[arg(long)]
        auto: bool,

        /// Stop after this many ticks if the game is still running
        #[arg(long, default_value_t = 3000)]
        ticks: u64,

        /// Tick in real time; Enter jumps, "r" restarts, "q" quits
        #[arg(long, conflicts_with = "auto")]
        realtime: bool,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Store a credential and sign in
    Login {
        /// Credential issued by the identity provider
        token: Option<String>,

        /// Issue a mock credential instead
        #[arg(long, conflicts_with = "token")]
        mock: bool,
    },

    /// Clear the stored credential
    Logout,

    /// Show whether a session is stored
    Show,
}

fn setup_logging(data_dir: &std::path::Path, verbosity: u8) -> Result<()> {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    LoggingBuilder::new(data_dir.join("logs"), "cli")
        .with_filter(filter)
        .init()?;
    Ok(())
}

fn require_session(app: &CoinPulse) -> Result<()> {
    if !app.session().is_authenticated() {
        anyhow::bail!("Not signed in. Run `coinpulse session login` first.");
    }
    Ok(())
}

fn print_coins(coins: &[Coin], search: &str, limit: usize) {
    let matches = filter_coins(coins, search);
    if matches.is_empty() {
        println!("No coins match '{}'.", search);
        return;
    }

    println!(
        "{:<4} {:<20} {:<6} {:>14} {:>9} {:>20}",
        "#", "Name", "Symbol", "Price", "24h %", "Market Cap"
    );
    for (rank, coin) in matches.iter().take(limit).enumerate() {
        let arrow = if coin.is_falling() { "▼" } else { "▲" };
        println!(
            "{:<4} {:<20} {:<6} {:>14} {:>8}{} {:>20}",
            rank + 1,
            coin.name,
            coin.symbol.to_uppercase(),
            format!("${:.2}", coin.current_price),
            coin.change_label(),
            arrow,
            format!("${}", format_usd(coin.market_cap)),
        );
    }
    if matches.len() > limit {
        println!("... {} more", matches.len() - limit);
    }
}

fn print_feed(feed: &MarketFeed, search: &str, limit: usize) {
    let updated = feed
        .updated_at
        .map(|t| t.with_timezone(&chrono::Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());
    println!();
    println!(
        "[Poll {}] updated {}{}",
        feed.completed_polls,
        updated,
        feed.last_error
            .as_deref()
            .map(|e| format!(" (last poll failed: {})", e))
            .unwrap_or_default()
    );
    if !feed.coins.is_empty() {
        print_coins(&feed.coins, search, limit);
    }
}

fn describe_view(view: View) -> &'static str {
    match view {
        View::Dashboard => "Online. Showing live prices.",
        View::Login => "Signed out. Stopping.",
        View::Offline => "You are offline. Prices will resume when the connection returns.",
    }
}

fn print_game_event(event: &GameEvent) {
    match event {
        GameEvent::Scored { score } => println!("Score: {}", score),
        GameEvent::Crashed { final_score } => println!("Game over! Final score: {}", final_score),
        GameEvent::Jumped | GameEvent::Landed => {}
    }
}

async fn play_realtime() -> Result<()> {
    println!("Offline mode: jump over the obstacles.");
    println!("Enter = jump, r = restart, q = quit");

    let game = GameLoop::start();
    let mut states = game.subscribe();
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    let mut shown = (0u32, false);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => match line?.as_deref().map(str::trim) {
                None | Some("q") => break,
                Some("r") => game.restart(),
                Some(_) => game.jump(),
            },
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = states.borrow_and_update().clone();
                if (state.score, state.game_over) != shown {
                    shown = (state.score, state.game_over);
                    if state.game_over {
                        println!("Game over! Final score: {} (r to restart)", state.score);
                    } else {
                        println!("Score: {}", state.score);
                    }
                }
            }
        }
    }

    println!("Final score: {}", game.snapshot().score);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    setup_logging(&data_dir, cli.verbose)?;

    let app = CoinPulse::open(&data_dir)?;

    match cli.command {
        Commands::Info => {
            let cache = app.offline_cache();

            println!("CoinPulse v0.1.0");
            println!();
            println!("Session:");
            match app.session().session() {
                Some(session) => println!("  Signed in ({})", session.preview()),
                None => println!("  Signed out"),
            }
            println!();
            println!("Market:");
            println!("  Provider: {}", app.config().market.base_url);
            println!(
                "  Poll interval: {}s",
                app.config().market.poll_interval().as_secs_f64()
            );
            println!();
            println!("Offline cache:");
            println!("  Version: {}", cache.version());
            println!(
                "  Status: {}",
                if cache.is_complete()? { "complete" } else { "not cached" }
            );
            println!();
            println!("Data directory: {}", app.data_dir().display());
        }

        Commands::Session { action } => match action {
            SessionAction::Login { token, mock } => {
                let token = match (token, mock) {
                    (Some(token), _) => token,
                    (None, true) => mock_credential(),
                    (None, false) => anyhow::bail!("Provide a credential or pass --mock"),
                };
                let session = app.session().login(token)?;
                println!("Signed in ({})", session.preview());
            }
            SessionAction::Logout => {
                app.session().logout()?;
                println!("Signed out.");
            }
            SessionAction::Show => match app.session().session() {
                Some(session) => println!("Signed in ({})", session.preview()),
                None => println!("Signed out."),
            },
        },

        Commands::Prices { search, limit } => {
            require_session(&app)?;
            let coins = app.market_client()?.fetch_markets().await?;
            print_coins(&coins, &search, limit);
        }

        Commands::Watch { search, limit } => {
            require_session(&app)?;

            let connectivity = app.connectivity().await;
            let live = app.live(connectivity)?;
            let mut feed = live.feed().subscribe();
            let mut view = live.subscribe_view();

            println!("{}", describe_view(live.view()));
            println!("Press Ctrl+C to stop.");

            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {
                        info!("Received Ctrl+C, stopping watch");
                        println!();
                        println!("Received shutdown signal...");
                        break;
                    }
                    changed = feed.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let snapshot = feed.borrow_and_update().clone();
                        print_feed(&snapshot, &search, limit);
                    }
                    changed = view.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let current = *view.borrow_and_update();
                        println!("{}", describe_view(current));
                        if current == View::Login {
                            break;
                        }
                    }
                }
            }

            live.shutdown().await;
            info!("Watch stopped");
        }

        Commands::Chat { message, coin } => {
            let client = app.chat_client()?;
            let mut conversation = app.conversation();
            let coin = coin.as_deref();

            if let Some(message) = message {
                if let Some(answer) = conversation.send(&client, &message, coin).await {
                    println!("{}", answer.content);
                }
                return Ok(());
            }

            for turn in conversation.turns() {
                println!("Assistant: {}", turn.content);
            }
            println!("Type a question and press Enter. Ctrl+D to quit.");

            let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                if let Some(answer) = conversation.send(&client, &line, coin).await {
                    let speaker = match answer.role {
                        ChatRole::Assistant => "Assistant",
                        ChatRole::User => "You",
                    };
                    println!("{}: {}", speaker, answer.content);
                }
            }
        }

        Commands::Precache { origin } => {
            let cache = app.offline_cache();
            let source = app.asset_source(origin.clone())?;

            let count = cache
                .precache(&source)
                .await
                .inspect_err(|e| error!(%origin, error = %e, "Precache failed"))?;
            let removed = cache.activate()?;
            println!("Cached {} offline assets ({}).", count, cache.version());
            if removed > 0 {
                println!("Removed {} stale entries.", removed);
            }
        }

        Commands::Play {
            auto,
            ticks,
            realtime,
        } => {
            if realtime {
                return play_realtime().await;
            }

            let mut state = GameState::new();
            while state.tick < ticks && !state.game_over {
                let input = if auto {
                    autopilot_input(&state)
                } else {
                    TickInput::default()
                };
                for event in step(&mut state, input) {
                    print_game_event(&event);
                }
            }

            if !state.game_over {
                println!("Stopped after {} ticks. Score: {}", state.tick, state.score);
            }
        }
    }

    Ok(())
}
