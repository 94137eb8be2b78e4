//! Tracing layer that appends events to a daily JSONL file.

use std::fmt::Write as FmtWrite;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use super::entry::LogEntry;

/// Writes every event as one JSON line to `logs/coinpulse-YYYY-MM-DD.jsonl`.
pub struct JsonlLayer {
    app: String,
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl JsonlLayer {
    pub fn new(logs_dir: impl AsRef<Path>, app: impl Into<String>) -> std::io::Result<Self> {
        let logs_dir = logs_dir.as_ref();
        fs::create_dir_all(logs_dir)?;

        let date = chrono::Local::now().format("%Y-%m-%d");
        let path = logs_dir.join(format!("coinpulse-{}.jsonl", date));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            app: app.into(),
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn log_path(&self) -> &Path {
        &self.path
    }

    fn write(&self, entry: &LogEntry) -> std::io::Result<()> {
        let line = entry.to_json_line().map_err(std::io::Error::other)?;
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", line)?;
        writer.flush()
    }
}

impl<S> Layer<S> for JsonlLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = metadata.level().as_str().to_lowercase();

        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);

        let mut entry = LogEntry::new(
            level,
            &self.app,
            metadata.target(),
            visitor.message.unwrap_or_default(),
        );

        if !visitor.fields.is_empty() {
            entry = entry.with_fields(serde_json::Value::Object(visitor.fields));
        }

        if let Some(scope) = ctx.event_scope(event) {
            let spans: Vec<&str> = scope.from_root().map(|span| span.name()).collect();
            if !spans.is_empty() {
                entry = entry.with_span(spans.join(" > "));
            }
        }

        // Logging must never take the process down.
        let _ = self.write(&entry);
    }
}

#[derive(Default)]
struct JsonVisitor {
    message: Option<String>,
    fields: serde_json::Map<String, serde_json::Value>,
}

impl JsonVisitor {
    fn insert(&mut self, field: &Field, value: serde_json::Value) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for JsonVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let mut buf = String::new();
        let _ = write!(&mut buf, "{:?}", value);

        if field.name() == "message" {
            self.message = Some(buf);
        } else {
            self.insert(field, serde_json::Value::String(buf));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.insert(field, serde_json::Value::String(value.to_string()));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, value.into());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if let Some(n) = serde_json::Number::from_f64(value) {
            self.insert(field, serde_json::Value::Number(n));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tracing_subscriber::prelude::*;

    #[test]
    fn test_jsonl_layer_captures_events() {
        let temp = TempDir::new().unwrap();
        let layer = JsonlLayer::new(temp.path().join("logs"), "test").unwrap();
        let log_path = layer.log_path().to_path_buf();

        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Market poller started");
            let span = tracing::info_span!("poll");
            let _guard = span.enter();
            tracing::warn!(failed_polls = 3u64, online = false, "Failed to fetch");
        });

        let content = std::fs::read_to_string(&log_path).unwrap();
        let entries: Vec<LogEntry> = content
            .lines()
            .map(|l| LogEntry::from_json_line(l).unwrap())
            .collect();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, "info");
        assert_eq!(entries[0].msg, "Market poller started");
        assert_eq!(entries[0].app, "test");
        assert!(entries[0].span.is_none());

        assert_eq!(entries[1].level, "warn");
        assert_eq!(entries[1].span.as_deref(), Some("poll"));
        let fields = entries[1].fields.as_ref().unwrap();
        assert_eq!(fields["failed_polls"], 3);
        assert_eq!(fields["online"], false);
    }

    #[test]
    fn test_file_is_appended_across_layers() {
        let temp = TempDir::new().unwrap();
        let logs = temp.path().join("logs");

        for msg in ["first", "second"] {
            let layer = JsonlLayer::new(&logs, "test").unwrap();
            let subscriber = tracing_subscriber::registry().with(layer);
            tracing::subscriber::with_default(subscriber, || tracing::info!("{}", msg));
        }

        let layer = JsonlLayer::new(&logs, "test").unwrap();
        let content = std::fs::read_to_string(layer.log_path()).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
