//! Grok x F.R.I.D.A.Y. dashboard core
//!
//! This crate provides the pieces shared by the proxy server and the
//! dashboard front ends:
//!
//! - Error taxonomy of the proxy endpoint and the dashboard client
//! - Personas, answer fragments, combined responses and session history
//! - Dashboard submission state machine and persona backends
//! - Logging and environment configuration helpers

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dashboard;
pub mod error;
pub mod types;
pub mod utils;

// Re-export main types
pub use config::{
    get_env_bool, get_env_int, get_env_or, get_env_timeout, get_required_env, load_env,
    load_env_from_path, proxy_client_timeout, DEFAULT_REQUEST_TIMEOUT, PROXY_TIMEOUT_MARGIN,
};
pub use dashboard::{DashboardState, PersonaBackend, PersonaPanel, SubmitOutcome};
pub use error::{FridayError, PersonaError, Result, PERSONA_FALLBACK_MESSAGE};
pub use types::*;
pub use utils::{init_logging, Logger};
