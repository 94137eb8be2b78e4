//! CLI Integration Tests
//!
//! These tests verify the CLI commands work correctly end-to-end.
//! None of them need the market provider or the chat backend to be up.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// Create a CLI command with a temporary data directory
fn cli_cmd(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("coinpulse").expect("Failed to find coinpulse binary");
    cmd.arg("--data-dir").arg(data_dir.path());
    cmd.env_remove("COINPULSE_API_URL")
        .env_remove("COINPULSE_MARKET_URL")
        .env_remove("COINGECKO_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Info Command Tests
// ============================================================================

#[test]
fn test_info_command() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("CoinPulse"))
        .stdout(predicate::str::contains("Signed out"))
        .stdout(predicate::str::contains("coinpulse-cache-v1"))
        .stdout(predicate::str::contains("not cached"))
        .stdout(predicate::str::contains("Data directory:"));
}

#[test]
fn test_info_uses_config_file() {
    let data_dir = TempDir::new().unwrap();
    std::fs::write(
        data_dir.path().join("config.toml"),
        "[market]\nbase_url = \"http://prices.internal/api\"\n",
    )
    .unwrap();

    cli_cmd(&data_dir)
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("http://prices.internal/api"));
}

#[test]
fn test_malformed_config_fails() {
    let data_dir = TempDir::new().unwrap();
    std::fs::write(data_dir.path().join("config.toml"), "[market\n").unwrap();

    cli_cmd(&data_dir)
        .arg("info")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));
}

// ============================================================================
// Session Command Tests
// ============================================================================

#[test]
fn test_session_login_persists_across_runs() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["session", "login", "abcdef-secret-token"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in (abcdef…)"))
        .stdout(predicate::str::contains("secret").not());

    cli_cmd(&data_dir)
        .args(["session", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in (abcdef…)"));
}

#[test]
fn test_session_login_mock() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["session", "login", "--mock"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in (mock-o…)"));
}

#[test]
fn test_session_login_requires_credential() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["session", "login"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Provide a credential"));
}

#[test]
fn test_session_login_rejects_blank_credential() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["session", "login", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Credential must not be empty"));
}

#[test]
fn test_session_logout_is_idempotent() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["session", "login", "token-1"])
        .assert()
        .success();

    for _ in 0..2 {
        cli_cmd(&data_dir)
            .args(["session", "logout"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Signed out."));
    }

    cli_cmd(&data_dir)
        .args(["session", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out."));
}

// ============================================================================
// Market Command Tests
// ============================================================================

#[test]
fn test_prices_requires_session() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .arg("prices")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not signed in"));
}

#[test]
fn test_watch_requires_session() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .arg("watch")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not signed in"));
}

#[test]
fn test_prices_reports_unreachable_provider() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["session", "login", "token-1"])
        .assert()
        .success();

    cli_cmd(&data_dir)
        .env("COINPULSE_MARKET_URL", "http://127.0.0.1:9")
        .arg("prices")
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP error"));
}

// ============================================================================
// Chat Command Tests
// ============================================================================

#[test]
fn test_chat_error_is_shown_inline() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .env("COINPULSE_API_URL", "http://127.0.0.1:9")
        .args(["chat", "How is bitcoin doing?"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Sorry, I encountered an error:"))
        .stdout(predicate::str::contains("Please try again."));
}

// ============================================================================
// Offline Command Tests
// ============================================================================

#[test]
fn test_precache_fails_without_origin() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["precache", "--origin", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Asset error"))
        .stderr(predicate::str::contains("Precache failed"));

    cli_cmd(&data_dir)
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("not cached"));
}

#[test]
fn test_play_without_input_crashes_on_first_obstacle() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .arg("play")
        .assert()
        .success()
        .stdout(predicate::str::contains("Game over! Final score: 0"));
}

#[test]
fn test_play_autopilot_scores() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["play", "--auto", "--ticks", "500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 1"))
        .stdout(predicate::str::contains("Stopped after 500 ticks"))
        .stdout(predicate::str::contains("Game over").not());
}

#[test]
fn test_play_flags_conflict() {
    let data_dir = TempDir::new().unwrap();

    cli_cmd(&data_dir)
        .args(["play", "--auto", "--realtime"])
        .assert()
        .failure();
}
