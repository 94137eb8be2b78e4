//! Theme for CoinPulse desktop.

mod styles;

pub use styles::GLOBAL_STYLES;
