//! Page components for CoinPulse, one per view.

mod dashboard;
mod login;
mod offline;

pub use dashboard::Dashboard;
pub use login::Login;
pub use offline::Offline;
