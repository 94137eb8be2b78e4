//! UI Components for CoinPulse.

mod chatbot;
mod coin_row;
mod offline_game;

pub use chatbot::Chatbot;
pub use coin_row::CoinRow;
pub use offline_game::OfflineGame;
