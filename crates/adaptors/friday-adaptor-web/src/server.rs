//! Dashboard HTTP server

use crate::config::{DashboardServerConfig, ProxyRoute};
use crate::handlers::{health_check, index, logs_sse, persona_proxy_handler, ServerState};
use axum::{
    routing::{get, post},
    Router,
};
use friday_core::{FridayError, Result};
use friday_provider_openai::ChatCompletionClient;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Serves the persona proxy endpoints and the dashboard page
pub struct DashboardServer {
    config: Arc<DashboardServerConfig>,
    routes: Arc<Vec<ProxyRoute>>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    local_addr: Option<SocketAddr>,
    running: bool,
}

impl DashboardServer {
    /// Create a server for `routes`; nothing is bound until [`start`](Self::start)
    pub fn new(config: DashboardServerConfig, routes: Vec<ProxyRoute>) -> Self {
        Self {
            config: Arc::new(config),
            routes: Arc::new(routes),
            shutdown_tx: None,
            local_addr: None,
            running: false,
        }
    }

    /// Build the router with a fresh upstream client
    pub fn router(&self) -> Result<Router> {
        let state = ServerState {
            routes: self.routes.clone(),
            client: ChatCompletionClient::new(self.config.upstream_timeout)?,
            config: self.config.clone(),
            start_time: Instant::now(),
        };
        Ok(Self::build_router(state))
    }

    fn build_router(state: ServerState) -> Router {
        let enable_cors = state.config.enable_cors;
        let logs_enabled = state.config.logs_enabled;

        let mut router = Router::new()
            .route("/", get(index))
            .route("/health", get(health_check))
            .route("/api/:persona", post(persona_proxy_handler));

        if logs_enabled {
            router = router.route("/logs", get(logs_sse));
        }

        let mut router = router.with_state(state).layer(TraceLayer::new_for_http());

        if enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            router = router.layer(cors);
        }

        router
    }

    /// Bind and serve in the background
    pub async fn start(&mut self) -> Result<()> {
        if self.running {
            return Err(FridayError::config("Server already running"));
        }

        let router = self.router()?;
        let addr = self.config.bind_addr();

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| FridayError::config(format!("Failed to bind to {}: {}", addr, e)))?;
        let local_addr = listener.local_addr()?;
        info!("Dashboard server listening on http://{}", local_addr);
        for route in self.routes.iter() {
            info!(
                "  POST {} -> {} ({})",
                route.persona.route(),
                route.upstream.service,
                route.upstream.model
            );
        }

        let (tx, rx) = tokio::sync::oneshot::channel();
        self.shutdown_tx = Some(tx);

        tokio::spawn(async move {
            let server = axum::serve(listener, router).with_graceful_shutdown(async {
                let _ = rx.await;
            });
            if let Err(e) = server.await {
                error!("Server error: {}", e);
            }
        });

        self.local_addr = Some(local_addr);
        self.running = true;
        Ok(())
    }

    /// Stop the server
    pub async fn stop(&mut self) -> Result<()> {
        if !self.running {
            return Ok(());
        }

        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }

        self.running = false;
        self.local_addr = None;

        info!("Dashboard server stopped");
        Ok(())
    }

    /// Check if server is running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Bound address while running
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    /// `http://host:port` while running
    pub fn base_url(&self) -> Option<String> {
        self.local_addr.map(|a| format!("http://{}", a))
    }
}
