//! Common test utilities and mock upstreams

#![allow(dead_code)]

use axum::{extract::State, http::StatusCode, routing::post, Router};
use friday_adaptor_web::{DashboardServerConfig, ProxyRoute};
use friday_core::Persona;
use friday_provider_openai::UpstreamConfig;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Canned reply of a mock chat-completion upstream
pub struct MockUpstream {
    pub status: StatusCode,
    pub body: String,
    pub delay: Duration,
    pub hits: AtomicUsize,
}

impl MockUpstream {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Success body carrying `content` as the first choice
pub fn completion_body(content: &str) -> String {
    json!({
        "id": "chatcmpl-test",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    })
    .to_string()
}

async fn mock_completions(State(state): State<Arc<MockUpstream>>) -> (StatusCode, String) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (state.status, state.body.clone())
}

/// Start a mock upstream on a free port
pub async fn start_mock_upstream(status: StatusCode, body: impl Into<String>) -> (SocketAddr, Arc<MockUpstream>) {
    start_slow_upstream(status, body, Duration::ZERO).await
}

/// Start a mock upstream that waits `delay` before answering
pub async fn start_slow_upstream(
    status: StatusCode,
    body: impl Into<String>,
    delay: Duration,
) -> (SocketAddr, Arc<MockUpstream>) {
    let state = Arc::new(MockUpstream {
        status,
        body: body.into(),
        delay,
        hits: AtomicUsize::new(0),
    });
    let app = Router::new()
        .route("/v1/chat/completions", post(mock_completions))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, state)
}

/// Upstream config aimed at a mock, with a key variable that is never set
pub fn mock_upstream_config(base: UpstreamConfig, addr: SocketAddr) -> UpstreamConfig {
    base.with_api_url(format!("http://{}/v1/chat/completions", addr))
        .with_api_key_env("FRIDAY_WEB_TEST_KEY_UNSET")
}

/// Grok and F.R.I.D.A.Y. routes against two mocks
pub fn mock_routes(grok: SocketAddr, friday: SocketAddr) -> Vec<ProxyRoute> {
    vec![
        ProxyRoute::new(Persona::grok(), mock_upstream_config(UpstreamConfig::xai(), grok)),
        ProxyRoute::new(Persona::friday(), mock_upstream_config(UpstreamConfig::openai(), friday)),
    ]
}

/// Server config on a free port with a short upstream timeout
pub fn test_config() -> DashboardServerConfig {
    DashboardServerConfig {
        port: 0,
        upstream_timeout: Duration::from_secs(5),
        ..Default::default()
    }
}
