//! GameState: the complete snapshot of the offline mini-game.
//!
//! Geometry is in pixels on a 400px-wide strip, x growing rightwards and
//! heights measured from the bottom edge. The player stands still at
//! `PLAYER_LEFT`; only the obstacle moves.

// ── Geometry ──

pub const PLAYER_LEFT: i32 = 50;
pub const PLAYER_WIDTH: i32 = 30;
pub const PLAYER_HEIGHT: i32 = 50;
pub const GROUND_HEIGHT: i32 = 20;
pub const JUMP_HEIGHT: i32 = 150;
pub const OBSTACLE_WIDTH: i32 = 20;
pub const OBSTACLE_HEIGHT: i32 = 30;

/// Where the obstacle appears, and where it returns after each pass.
pub const OBSTACLE_START: i32 = 400;
/// Once the obstacle is at or left of this x, the pass is scored.
pub const LOOP_BOUNDARY: i32 = -50;

// ── Timing ──

/// One simulation tick in milliseconds.
pub const TICK_MS: u64 = 20;
/// Obstacle travel per tick.
pub const OBSTACLE_STEP: i32 = 5;
/// Airborne time: 500 ms.
pub const JUMP_TICKS: u32 = 25;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Running,
    Jumping,
    GameOver,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub score: u32,
    pub is_jumping: bool,
    pub game_over: bool,
    /// Left edge of the obstacle
    pub obstacle_position: i32,
    /// Ticks left before the player lands; zero on the ground
    pub jump_ticks_remaining: u32,
    /// Ticks simulated since the last restart
    pub tick: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            score: 0,
            is_jumping: false,
            game_over: false,
            obstacle_position: OBSTACLE_START,
            jump_ticks_remaining: 0,
            tick: 0,
        }
    }

    /// Back to the initial state, from any phase.
    pub fn restart(&mut self) {
        *self = Self::new();
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.is_jumping {
            Phase::Jumping
        } else {
            Phase::Running
        }
    }

    /// Bottom edge of the player.
    pub fn player_bottom(&self) -> i32 {
        if self.is_jumping {
            JUMP_HEIGHT
        } else {
            GROUND_HEIGHT
        }
    }

    /// Whether the obstacle overlaps the player's horizontal footprint.
    pub fn obstacle_overlaps_player(&self) -> bool {
        let obstacle_left = self.obstacle_position;
        let obstacle_right = obstacle_left + OBSTACLE_WIDTH;
        obstacle_right > PLAYER_LEFT && obstacle_left < PLAYER_LEFT + PLAYER_WIDTH
    }
}
