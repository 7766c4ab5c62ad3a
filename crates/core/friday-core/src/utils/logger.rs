//! Logging utilities

use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

/// A single log record as forwarded to live subscribers
#[derive(Clone, Debug, Serialize)]
pub struct LogEvent {
    /// Level name ("INFO", "WARN", ...)
    pub level: String,
    /// Module path the event came from
    pub target: String,
    /// Formatted message
    pub message: String,
    /// Source file, if known
    pub file: Option<String>,
    /// Source line, if known
    pub line: Option<u32>,
    /// RFC 3339 timestamp
    pub time: String,
}

static LOG_TX: OnceCell<broadcast::Sender<LogEvent>> = OnceCell::new();

/// Subscribe to live log events. `None` until [`init_logging`] ran.
pub fn subscribe_logs() -> Option<broadcast::Receiver<LogEvent>> {
    LOG_TX.get().map(|tx| tx.subscribe())
}

struct BroadcastLayer {
    tx: broadcast::Sender<LogEvent>,
}

impl<S> Layer<S> for BroadcastLayer
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        use tracing::field::{Field, Visit};
        struct MsgVisitor {
            msg: String,
        }
        impl Visit for MsgVisitor {
            fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.msg = format!("{:?}", value);
                }
            }
            fn record_str(&mut self, field: &Field, value: &str) {
                if field.name() == "message" {
                    self.msg = value.to_string();
                }
            }
        }
        let mut visitor = MsgVisitor { msg: String::new() };
        event.record(&mut visitor);
        let meta = event.metadata();
        let ev = LogEvent {
            level: meta.level().to_string(),
            target: meta.target().to_string(),
            message: visitor.msg,
            file: meta.file().map(|s| s.to_string()),
            line: meta.line(),
            time: chrono::Utc::now().to_rfc3339(),
        };
        let _ = self.tx.send(ev);
    }
}

/// Logger wrapper for component-specific logging
#[derive(Clone)]
pub struct Logger {
    namespace: String,
}

impl Logger {
    /// Create a new logger with a namespace
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// Log an info message
    pub fn info(&self, message: &str) {
        info!("[{}] {}", self.namespace, message);
    }

    /// Log a debug message
    pub fn debug(&self, message: &str) {
        debug!("[{}] {}", self.namespace, message);
    }

    /// Log a warning message
    pub fn warn(&self, message: &str) {
        warn!("[{}] {}", self.namespace, message);
    }

    /// Log an error message
    pub fn error(&self, message: &str) {
        error!("[{}] {}", self.namespace, message);
    }

    /// Log a success message (info level with prefix)
    pub fn success(&self, message: &str) {
        info!("[{}] ✓ {}", self.namespace, message);
    }
}

/// Initialize the global logging system
///
/// Level comes from `RUST_LOG`, then `FRIDAY_LOG_LEVEL`, then `info`.
/// Calling it again after a subscriber is installed is a no-op.
pub fn init_logging() {
    let level = std::env::var("FRIDAY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into());

    let tx = LOG_TX
        .get_or_init(|| {
            let (tx, _rx) = broadcast::channel(1024);
            tx
        })
        .clone();

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(BroadcastLayer { tx })
        .try_init();
}

static SCRUB_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(sk|xai)-[A-Za-z0-9_-]{20,}", "sk-REDACTED"),
        (r"(?i)bearer\s+[A-Za-z0-9._-]{12,}", "Bearer REDACTED"),
        (
            r"(?i)api[_-]?key\s*[:=]?\s*[A-Za-z0-9-_]{12,}",
            "api_key=REDACTED",
        ),
        (
            r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}",
            "email@redacted",
        ),
        (r"\b\+?\d[\d\s-]{8,}\b", "PHONE_REDACTED"),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
    .collect()
});

/// Redact credentials and personal data from a log message before it leaves the process
pub fn scrub_message(mut s: String) -> String {
    if s.len() > 2000 {
        s = s.chars().take(2000).collect();
    }
    for (re, rep) in SCRUB_PATTERNS.iter() {
        s = re.replace_all(&s, *rep).into_owned();
    }
    s
}
