//! Web adaptor for the Grok x F.R.I.D.A.Y. dashboard
//!
//! Serves `POST /api/<persona>` proxy endpoints that forward a query to the
//! persona's upstream chat-completion service, plus the browser dashboard
//! page at `/`, a `/health` probe and optional scrubbed log streaming.

pub mod config;
pub mod handlers;
pub mod page;
pub mod server;

pub use config::{default_routes, DashboardServerConfig, ProxyRoute};
pub use handlers::{ApiError, HealthResponse, ServerState};
pub use page::render_index;
pub use server::DashboardServer;
