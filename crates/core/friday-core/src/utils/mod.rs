//! Utility functions

pub mod greeting;
pub mod logger;

pub use greeting::{greeting_at, random_greeting, GREETINGS};
pub use logger::{init_logging, scrub_message, subscribe_logs, LogEvent, Logger};
