//! Tests of the chat-completion client against a local mock upstream

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use friday_core::FridayError;
use friday_provider_openai::{ChatCompletionClient, UpstreamConfig};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct Captured {
    body: Option<Value>,
    authorization: Option<String>,
}

struct MockUpstream {
    status: StatusCode,
    reply: String,
    captured: Mutex<Captured>,
}

async fn mock_completions(
    State(state): State<Arc<MockUpstream>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    {
        let mut captured = state.captured.lock().unwrap();
        captured.body = Some(body);
        captured.authorization = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
    }
    (state.status, state.reply.clone())
}

async fn start_mock_upstream(status: StatusCode, reply: &str) -> (SocketAddr, Arc<MockUpstream>) {
    let state = Arc::new(MockUpstream {
        status,
        reply: reply.to_string(),
        captured: Mutex::new(Captured::default()),
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

fn upstream_for(addr: SocketAddr, key_env: &str) -> UpstreamConfig {
    UpstreamConfig::openai()
        .with_api_url(format!("http://{}/v1/chat/completions", addr))
        .with_api_key_env(key_env)
}

fn client() -> ChatCompletionClient {
    ChatCompletionClient::new(Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_complete_returns_content_unmodified() {
    let reply = json!({
        "choices": [{"message": {"role": "assistant", "content": "  Nominal.\n"}}]
    })
    .to_string();
    let (addr, mock) = start_mock_upstream(StatusCode::OK, &reply).await;
    std::env::set_var("FRIDAY_TEST_UPSTREAM_KEY_OK", "test-key-123");

    let answer = client()
        .complete(&upstream_for(addr, "FRIDAY_TEST_UPSTREAM_KEY_OK"), "status report")
        .await
        .unwrap();

    assert_eq!(answer, "  Nominal.\n");
    let captured = mock.captured.lock().unwrap();
    assert_eq!(
        captured.body.as_ref().unwrap(),
        &json!({
            "model": "gpt-4o",
            "messages": [{"role": "user", "content": "status report"}],
            "max_tokens": 150
        })
    );
    assert_eq!(captured.authorization.as_deref(), Some("Bearer test-key-123"));
}

#[tokio::test]
async fn test_complete_reports_upstream_status_and_body() {
    let (addr, _) =
        start_mock_upstream(StatusCode::UNAUTHORIZED, r#"{"error":"invalid api key"}"#).await;

    let err = client()
        .complete(&upstream_for(addr, "FRIDAY_TEST_UPSTREAM_KEY_UNSET"), "hello")
        .await
        .unwrap_err();

    assert!(matches!(err, FridayError::Upstream { status: 401, .. }));
    assert_eq!(
        err.to_string(),
        r#"OpenAI API error: 401 - {"error":"invalid api key"}"#
    );
}

#[tokio::test]
async fn test_complete_rejects_missing_content() {
    let (addr, _) = start_mock_upstream(StatusCode::OK, r#"{"choices":[{"message":{}}]}"#).await;

    let err = client()
        .complete(&upstream_for(addr, "FRIDAY_TEST_UPSTREAM_KEY_UNSET"), "hello")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid response format from OpenAI API");
}

#[tokio::test]
async fn test_complete_rejects_non_json_success() {
    let (addr, _) = start_mock_upstream(StatusCode::OK, "<html>gateway</html>").await;

    let err = client()
        .complete(&upstream_for(addr, "FRIDAY_TEST_UPSTREAM_KEY_UNSET"), "hello")
        .await
        .unwrap_err();

    assert!(matches!(err, FridayError::InvalidUpstreamResponse { .. }));
}

#[tokio::test]
async fn test_unset_key_sends_empty_bearer() {
    let reply = json!({"choices": [{"message": {"content": "ok"}}]}).to_string();
    let (addr, mock) = start_mock_upstream(StatusCode::OK, &reply).await;

    client()
        .complete(&upstream_for(addr, "FRIDAY_TEST_UPSTREAM_KEY_NEVER_SET"), "hi")
        .await
        .unwrap();

    // reqwest may trim the trailing space of "Bearer "
    let captured = mock.captured.lock().unwrap();
    assert_eq!(
        captured.authorization.as_deref().map(str::trim_end),
        Some("Bearer")
    );
}
