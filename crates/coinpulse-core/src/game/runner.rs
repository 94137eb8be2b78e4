//! Real-time driver for the offline game.
//!
//! One tokio task ticks the simulation every [`TICK_MS`]. Input arrives
//! between ticks and is latched until the next one, so every state change
//! happens inside `step` in its fixed order. The latch is only read or
//! cleared while the state is locked.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::state::{GameState, TICK_MS};
use super::step::{step, GameEvent, TickInput};

/// A running game. Dropping it stops the tick task.
pub struct GameLoop {
    state: Arc<watch::Sender<GameState>>,
    jump_requested: Arc<AtomicBool>,
    token: CancellationToken,
}

impl GameLoop {
    /// Start a fresh game ticking at the standard rate.
    pub fn start() -> Self {
        Self::start_with_tick(Duration::from_millis(TICK_MS))
    }

    pub fn start_with_tick(tick: Duration) -> Self {
        let (tx, _rx) = watch::channel(GameState::new());
        let state = Arc::new(tx);
        let jump_requested = Arc::new(AtomicBool::new(false));
        let token = CancellationToken::new();

        tokio::spawn(run_ticks(
            state.clone(),
            jump_requested.clone(),
            tick,
            token.clone(),
        ));

        Self {
            state,
            jump_requested,
            token,
        }
    }

    /// Request a jump on the next tick (key press or tap).
    pub fn jump(&self) {
        self.jump_requested.store(true, Ordering::SeqCst);
    }

    /// Reset to the initial state. Works in any phase.
    pub fn restart(&self) {
        // Cleared under the state lock so a tick cannot carry a stale jump
        // into the fresh game.
        self.state.send_modify(|game| {
            self.jump_requested.store(false, Ordering::SeqCst);
            game.restart();
        });
        info!("Offline game restarted");
    }

    pub fn snapshot(&self) -> GameState {
        self.state.borrow().clone()
    }

    /// Receive every state change for rendering.
    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.state.subscribe()
    }
}

impl Drop for GameLoop {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

async fn run_ticks(
    state: Arc<watch::Sender<GameState>>,
    jump_requested: Arc<AtomicBool>,
    tick: Duration,
    token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let mut events = Vec::new();
        state.send_if_modified(|game| {
            let input = TickInput {
                jump: jump_requested.swap(false, Ordering::SeqCst),
            };
            let before = game.clone();
            events = step(game, input);
            *game != before
        });

        for event in events {
            match event {
                GameEvent::Scored { score } => debug!(score, "Obstacle cleared"),
                GameEvent::Crashed { final_score } => info!(final_score, "Offline game over"),
                GameEvent::Jumped | GameEvent::Landed => {}
            }
        }
    }

    debug!("Offline game loop stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::{Phase, OBSTACLE_START};

    #[tokio::test(start_paused = true)]
    async fn test_loop_advances_obstacle() {
        let game = GameLoop::start();
        let mut rx = game.subscribe();

        rx.wait_for(|s| s.obstacle_position <= OBSTACLE_START - 50).await.unwrap();
        assert!(!game.snapshot().game_over);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unattended_game_ends_and_restarts() {
        let game = GameLoop::start();
        let mut rx = game.subscribe();

        rx.wait_for(|s| s.game_over).await.unwrap();
        assert_eq!(game.snapshot().phase(), Phase::GameOver);
        assert_eq!(game.snapshot().score, 0);

        game.restart();
        let state = game.snapshot();
        assert_eq!(state.phase(), Phase::Running);
        assert!(state.obstacle_position >= OBSTACLE_START - 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_discards_pending_jump() {
        let game = GameLoop::start();
        let mut rx = game.subscribe();
        rx.wait_for(|s| s.tick >= 3).await.unwrap();

        game.jump();
        game.restart();
        assert!(!game.jump_requested.load(Ordering::SeqCst));

        rx.wait_for(|s| s.tick >= 2).await.unwrap();
        let state = game.snapshot();
        assert!(!state.is_jumping);
        assert_eq!(state.phase(), Phase::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_jump_request_is_applied_on_next_tick() {
        let game = GameLoop::start();
        let mut rx = game.subscribe();
        rx.wait_for(|s| s.tick >= 3).await.unwrap();

        game.jump();
        rx.wait_for(|s| s.is_jumping).await.unwrap();

        rx.wait_for(|s| !s.is_jumping).await.unwrap();
        assert!(!game.snapshot().game_over);
    }
}
