//! Logging setup: console output plus a JSONL file per day.
//!
//! ```text
//! <data_dir>/logs/
//! ├── coinpulse-2026-10-17.jsonl
//! └── coinpulse-2026-10-18.jsonl
//! ```
//!
//! ```ignore
//! use coinpulse_core::logging::LoggingBuilder;
//!
//! LoggingBuilder::new(data_dir.join("logs"), "cli")
//!     .with_filter("coinpulse_core=debug")
//!     .init()?;
//! ```
//!
//! Query with jq:
//!
//! ```bash
//! jq 'select(.level == "warn")' logs/*.jsonl
//! ```

mod entry;
mod layer;

pub use entry::LogEntry;
pub use layer::JsonlLayer;

use std::path::PathBuf;

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Builder for the global tracing subscriber.
pub struct LoggingBuilder {
    logs_dir: PathBuf,
    app: String,
    console_output: bool,
    file_output: bool,
    env_filter: Option<String>,
}

impl LoggingBuilder {
    pub fn new(logs_dir: impl Into<PathBuf>, app: impl Into<String>) -> Self {
        Self {
            logs_dir: logs_dir.into(),
            app: app.into(),
            console_output: true,
            file_output: true,
            env_filter: None,
        }
    }

    /// Only write to the JSONL file.
    pub fn no_console(mut self) -> Self {
        self.console_output = false;
        self
    }

    /// Only write to the console.
    pub fn no_file(mut self) -> Self {
        self.file_output = false;
        self
    }

    /// Default filter directive, used when `RUST_LOG` is unset
    /// (e.g. "coinpulse=info,coinpulse_core=debug").
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    pub fn build_layer(&self) -> std::io::Result<JsonlLayer> {
        JsonlLayer::new(&self.logs_dir, &self.app)
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(self.env_filter.as_deref().unwrap_or("info"))
        })
    }

    /// Install as the global subscriber.
    ///
    /// Fails if the log directory cannot be created. Installing twice is a
    /// no-op for the second call.
    pub fn init(self) -> std::io::Result<()> {
        let file_layer = if self.file_output {
            Some(self.build_layer()?)
        } else {
            None
        };
        let console_layer = self
            .console_output
            .then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

        let _ = tracing_subscriber::registry()
            .with(self.filter())
            .with(file_layer)
            .with(console_layer)
            .try_init();
        Ok(())
    }
}
