//! Dashboard client
//!
//! Holds the UI state of one dashboard session and drives submissions
//! against the persona proxy endpoints.
//!
//! # Example
//!
//! ```no_run
//! use friday_core::dashboard::{DashboardState, PersonaPanel};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> friday_core::Result<()> {
//!     let panel = PersonaPanel::proxied("http://127.0.0.1:4000", Duration::from_secs(30))?;
//!     let mut state = DashboardState::new();
//!     state.set_query("status report");
//!     state.submit(&panel).await;
//!     println!("{:?}", state.response());
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod panel;
pub mod state;

pub use backend::{PersonaBackend, ProxyPersonaClient, SimulatedPersona, SIMULATED_DELAY};
pub use panel::PersonaPanel;
pub use state::{
    DashboardState, IgnoreReason, PendingSubmission, SubmissionPhase, SubmitOutcome,
};
