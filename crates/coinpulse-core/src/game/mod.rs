//! Offline mini-game: a single fixed-tick simulation.
//!
//! - [`state`]: the game snapshot and its constants
//! - [`step`]: advances the snapshot by one tick
//! - [`GameLoop`]: ticks a shared snapshot in real time for the UI

mod runner;
pub mod state;
pub mod step;

pub use runner::GameLoop;
pub use state::{GameState, Phase};
pub use step::{autopilot_input, step, GameEvent, TickInput};
