//! The step function: advances the game by one tick.
//!
//! Processing order:
//!   1. Jump timer (land when airborne time runs out)
//!   2. Jump input
//!   3. Obstacle motion, scoring a pass when it wraps
//!   4. Collision check against the updated position
//!
//! Nothing advances once the game is over; only `restart` leaves that phase.

use super::state::{
    GameState, GROUND_HEIGHT, JUMP_TICKS, LOOP_BOUNDARY, OBSTACLE_HEIGHT, OBSTACLE_START,
    OBSTACLE_STEP,
};

/// Input gathered since the previous tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub jump: bool,
}

/// Events emitted during a step, for rendering and logging.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Jumped,
    Landed,
    Scored { score: u32 },
    Crashed { final_score: u32 },
}

/// Extra clearance above the obstacle the grounded player must exceed to pass.
const VERTICAL_MARGIN: i32 = 20;

pub fn step(state: &mut GameState, input: TickInput) -> Vec<GameEvent> {
    if state.game_over {
        return vec![];
    }

    let mut events = Vec::new();
    state.tick += 1;

    resolve_jump_timer(state, &mut events);
    resolve_jump_input(state, input, &mut events);
    resolve_obstacle_motion(state, &mut events);
    resolve_collision(state, &mut events);

    events
}

fn resolve_jump_timer(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if !state.is_jumping {
        return;
    }
    state.jump_ticks_remaining = state.jump_ticks_remaining.saturating_sub(1);
    if state.jump_ticks_remaining == 0 {
        state.is_jumping = false;
        events.push(GameEvent::Landed);
    }
}

fn resolve_jump_input(state: &mut GameState, input: TickInput, events: &mut Vec<GameEvent>) {
    if input.jump && !state.is_jumping {
        state.is_jumping = true;
        state.jump_ticks_remaining = JUMP_TICKS;
        events.push(GameEvent::Jumped);
    }
}

fn resolve_obstacle_motion(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.obstacle_position <= LOOP_BOUNDARY {
        state.score += 1;
        state.obstacle_position = OBSTACLE_START;
        events.push(GameEvent::Scored { score: state.score });
    } else {
        state.obstacle_position -= OBSTACLE_STEP;
    }
}

fn resolve_collision(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let below_threshold = state.player_bottom() < GROUND_HEIGHT + OBSTACLE_HEIGHT + VERTICAL_MARGIN;
    if state.obstacle_overlaps_player() && !state.is_jumping && below_threshold {
        state.game_over = true;
        events.push(GameEvent::Crashed {
            final_score: state.score,
        });
    }
}

/// Jump decision for unattended play: jump when the obstacle is close
/// enough that the whole overlap window falls inside one jump.
pub fn autopilot_input(state: &GameState) -> TickInput {
    const TRIGGER: i32 = 85;
    TickInput {
        jump: !state.is_jumping && state.obstacle_position <= TRIGGER && state.obstacle_position > 0,
    }
}
