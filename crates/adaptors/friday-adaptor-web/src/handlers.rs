//! Request handlers for the dashboard server

use crate::config::{DashboardServerConfig, ProxyRoute};
use crate::page::render_index;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, Sse},
    response::{Html, IntoResponse, Response},
    Json,
};
use friday_core::utils::logger::{scrub_message, subscribe_logs};
use friday_core::{FridayError, ProxyErrorBody, ProxyRequest, ProxyResponse, Result};
use friday_provider_openai::ChatCompletionClient;
use futures_util::stream::{self, BoxStream, StreamExt};
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{error, info};

/// Shared state for all handlers
#[derive(Clone)]
pub struct ServerState {
    /// Persona routes in answer order
    pub routes: Arc<Vec<ProxyRoute>>,

    /// Upstream chat-completion client
    pub client: ChatCompletionClient,

    /// Configuration
    pub config: Arc<DashboardServerConfig>,

    /// Server start time
    pub start_time: Instant,
}

impl ServerState {
    /// Route serving `slug`, if any
    pub fn route(&self, slug: &str) -> Option<&ProxyRoute> {
        self.routes.iter().find(|r| r.persona.slug == slug)
    }
}

/// Forward one query to the persona's upstream.
///
/// `POST /api/:persona` with `{ "input": string }`; answers
/// `200 { "response" }` or `500 { "error" }`.
pub async fn persona_proxy_handler(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    body: Bytes,
) -> Response {
    let Some(route) = state.route(&slug) else {
        return ApiError::NotFound(format!("Unknown persona '{}'", slug)).into_response();
    };

    match proxy_query(&state.client, route, &body).await {
        Ok(response) => {
            info!(
                "[{}] proxied query (answer_len={})",
                route.persona.name,
                response.len()
            );
            Json(ProxyResponse { response }).into_response()
        }
        Err(err) => {
            error!("{} API error: {}", route.persona.name, err);
            ApiError::from(err).into_response()
        }
    }
}

async fn proxy_query(client: &ChatCompletionClient, route: &ProxyRoute, body: &[u8]) -> Result<String> {
    let request: ProxyRequest = serde_json::from_slice(body)?;
    let input = request
        .input
        .filter(|s| !s.is_empty())
        .ok_or(FridayError::MissingInput)?;
    client.complete(&route.upstream, &input).await
}

/// Health check body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "ok" while the server answers
    pub status: &'static str,
    /// Persona slugs served under `/api/`
    pub personas: Vec<String>,
    /// Seconds since start
    pub uptime_seconds: u64,
}

/// `GET /health`
pub async fn health_check(State(state): State<ServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        personas: state.routes.iter().map(|r| r.persona.slug.clone()).collect(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

/// `GET /`: the browser dashboard
pub async fn index(State(state): State<ServerState>) -> Html<String> {
    let personas: Vec<_> = state.routes.iter().map(|r| r.persona.clone()).collect();
    Html(render_index(&personas, friday_core::utils::random_greeting()))
}

/// `GET /logs`: scrubbed live log events as SSE
pub async fn logs_sse() -> Sse<BoxStream<'static, std::result::Result<Event, Infallible>>> {
    let stream: BoxStream<'static, std::result::Result<Event, Infallible>> = match subscribe_logs() {
        Some(rx) => BroadcastStream::new(rx)
            .filter_map(|item| async move {
                match item {
                    Ok(mut ev) => {
                        ev.message = scrub_message(ev.message);
                        let data = serde_json::to_string(&ev).unwrap_or_else(|_| "{}".to_string());
                        Some(Ok(Event::default().data(data)))
                    }
                    Err(_) => None,
                }
            })
            .boxed(),
        None => stream::once(async {
            Ok(Event::default().data(r#"{"level":"INFO","target":"init","message":"logging not initialized"}"#))
        })
        .boxed(),
    };
    Sse::new(stream)
}

/// API error types
#[derive(Debug)]
pub enum ApiError {
    /// 404, e.g. an unknown persona slug
    NotFound(String),
    /// 500 carrying the proxy error message
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ProxyErrorBody { error })).into_response()
    }
}

impl From<FridayError> for ApiError {
    fn from(err: FridayError) -> Self {
        match err {
            FridayError::NotFound(msg) => ApiError::NotFound(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_response() {
        let response = ApiError::from(FridayError::MissingInput).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError::NotFound("Unknown persona 'jarvis'".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
