//! Logging setup and the sink command outcomes are reported to.
//!
//! Provides compact timestamped logging with per-module level configuration.
//! Supports `RUST_LOG` environment variable for runtime overrides.
//!
//! # Configuration
//!
//! ```toml
//! [logging]
//! default = "info"
//!
//! [logging.modules]
//! "cmdwatch::watcher" = "debug"
//! ```
//!
//! # Environment Variable
//!
//! `RUST_LOG` takes precedence over config:
//! ```bash
//! RUST_LOG=debug cmdwatch watch
//! ```

use std::error::Error;
use std::sync::Once;

use parking_lot::Mutex;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// Compact time format: HH:MM:SS.mmm
struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Initialize logging with configuration.
///
/// Call once at startup. Safe to call multiple times (only first call takes effect).
/// The `RUST_LOG` environment variable takes precedence over config settings.
pub fn init_with_config(config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            let mut filter_str = config.default.clone();
            for (module, level) in &config.modules {
                filter_str.push_str(&format!(",{module}={level}"));
            }
            EnvFilter::new(&filter_str)
        };

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_timer(CompactTime)
            .with_level(true)
            .with_filter(filter);

        tracing_subscriber::registry().with(fmt_layer).init();
    });
}

/// Log an event with component context.
///
/// # Examples
/// ```ignore
/// log_event!("watcher", "watching", "{}", path.display());
/// log_event!("watcher", "started");
/// ```
#[macro_export]
macro_rules! log_event {
    ($component:expr, $event:expr) => {
        tracing::info!("[{}] {}", $component, $event)
    };
    ($component:expr, $event:expr, $($arg:tt)*) => {
        tracing::info!("[{}] {}: {}", $component, $event, format!($($arg)*))
    };
}

/// Debug-only event logging.
///
/// # Examples
/// ```ignore
/// debug_event!("watcher", "duplicate", "{} bytes", len);
/// ```
#[macro_export]
macro_rules! debug_event {
    ($component:expr, $event:expr) => {
        tracing::debug!("[{}] {}", $component, $event)
    };
    ($component:expr, $event:expr, $($arg:tt)*) => {
        tracing::debug!("[{}] {}: {}", $component, $event, format!($($arg)*))
    };
}

/// Severity of a reported line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warn,
    Error,
}

/// Where command outcomes are reported. One call per reported line.
pub trait LogSink: Send + Sync {
    fn info(&self, message: &str);

    fn success(&self, message: &str);

    fn warn(&self, message: &str);

    fn error(&self, message: &str, cause: Option<&(dyn Error + 'static)>);
}

/// Appends the full source chain of `cause` to `message`.
fn with_cause(message: &str, cause: Option<&(dyn Error + 'static)>) -> String {
    let mut line = message.to_string();
    let mut next = cause;
    while let Some(err) = next {
        line.push_str(&format!(": {err}"));
        next = err.source();
    }
    line
}

/// Sink that writes through `tracing`; timestamps come from the subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn success(&self, message: &str) {
        tracing::info!("[ok] {message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn error(&self, message: &str, cause: Option<&(dyn Error + 'static)>) {
        tracing::error!("{}", with_cause(message, cause));
    }
}

/// A recorded sink line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub severity: Severity,
    pub message: String,
}

/// Sink that keeps every line in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.records
            .lock()
            .iter()
            .filter(|record| record.severity == severity)
            .count()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    fn push(&self, severity: Severity, message: String) {
        self.records.lock().push(LogRecord { severity, message });
    }
}

impl LogSink for MemorySink {
    fn info(&self, message: &str) {
        self.push(Severity::Info, message.to_string());
    }

    fn success(&self, message: &str) {
        self.push(Severity::Success, message.to_string());
    }

    fn warn(&self, message: &str) {
        self.push(Severity::Warn, message.to_string());
    }

    fn error(&self, message: &str, cause: Option<&(dyn Error + 'static)>) {
        self.push(Severity::Error, with_cause(message, cause));
    }
}

impl<S: LogSink + ?Sized> LogSink for std::sync::Arc<S> {
    fn info(&self, message: &str) {
        (**self).info(message);
    }

    fn success(&self, message: &str) {
        (**self).success(message);
    }

    fn warn(&self, message: &str) {
        (**self).warn(message);
    }

    fn error(&self, message: &str, cause: Option<&(dyn Error + 'static)>) {
        (**self).error(message, cause);
    }
}
