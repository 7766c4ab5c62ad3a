//! OpenAI-compatible chat-completion client used behind the persona proxy
//!
//! Both upstreams the dashboard talks to (OpenAI for F.R.I.D.A.Y., xAI for
//! Grok) accept the same request shape, so one client serves both; an
//! [`UpstreamConfig`] carries the per-service differences.

#![warn(missing_docs)]
#![warn(clippy::all)]

use friday_core::{FridayError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Output token budget sent with every completion request
pub const MAX_OUTPUT_TOKENS: u32 = 150;

/// Where and how to reach one upstream chat-completion service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    /// Service name used in error messages ("OpenAI", "xAI")
    pub service: String,
    /// Full chat-completions URL
    pub api_url: String,
    /// Model identifier sent upstream
    pub model: String,
    /// Output token limit
    pub max_tokens: u32,
    /// Environment variable holding the bearer credential
    pub api_key_env: String,
}

impl UpstreamConfig {
    /// OpenAI chat completions with `gpt-4o`
    pub fn openai() -> Self {
        Self {
            service: "OpenAI".to_string(),
            api_url: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4o".to_string(),
            max_tokens: MAX_OUTPUT_TOKENS,
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }

    /// xAI chat completions with `grok-beta`
    pub fn xai() -> Self {
        Self {
            service: "xAI".to_string(),
            api_url: "https://api.x.ai/v1/chat/completions".to_string(),
            model: "grok-beta".to_string(),
            max_tokens: MAX_OUTPUT_TOKENS,
            api_key_env: "XAI_API_KEY".to_string(),
        }
    }

    /// [`UpstreamConfig::openai`] with `OPENAI_API_URL` / `OPENAI_MODEL` overrides
    pub fn openai_from_env() -> Self {
        Self::openai().with_env_overrides("OPENAI_API_URL", "OPENAI_MODEL")
    }

    /// [`UpstreamConfig::xai`] with `XAI_API_URL` / `XAI_MODEL` overrides
    pub fn xai_from_env() -> Self {
        Self::xai().with_env_overrides("XAI_API_URL", "XAI_MODEL")
    }

    /// Point at another URL (mock servers, gateways)
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Read the credential from a different environment variable
    pub fn with_api_key_env(mut self, api_key_env: impl Into<String>) -> Self {
        self.api_key_env = api_key_env.into();
        self
    }

    fn with_env_overrides(mut self, url_key: &str, model_key: &str) -> Self {
        if let Ok(url) = std::env::var(url_key) {
            self.api_url = url;
        }
        if let Ok(model) = std::env::var(model_key) {
            self.model = model;
        }
        self
    }

    /// Current credential. Read on every call; an unset variable yields an
    /// empty key and the upstream's own authentication error.
    pub fn api_key(&self) -> String {
        std::env::var(&self.api_key_env).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Extract `choices[0].message.content`, treating an empty answer as missing
fn extract_content(body: &str) -> Option<String> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body).ok()?;
    parsed
        .choices
        .into_iter()
        .next()?
        .message?
        .content
        .filter(|c| !c.is_empty())
}

/// HTTP client for OpenAI-compatible chat completions
#[derive(Clone)]
pub struct ChatCompletionClient {
    client: Client,
}

impl ChatCompletionClient {
    /// Create a client whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(300))
            .tcp_keepalive(Duration::from_secs(60))
            .timeout(timeout)
            .build()
            .map_err(FridayError::Network)?;
        Ok(Self { client })
    }

    /// Send `input` as a single user message and return the answer text unmodified
    pub async fn complete(&self, upstream: &UpstreamConfig, input: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &upstream.model,
            messages: vec![ChatMessage {
                role: "user",
                content: input,
            }],
            max_tokens: upstream.max_tokens,
        };

        let start_time = std::time::Instant::now();
        let resp = self
            .client
            .post(&upstream.api_url)
            .header("Authorization", format!("Bearer {}", upstream.api_key()))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        tracing::debug!(
            "{} completion status={} latency_ms={} body_len={}",
            upstream.service,
            status.as_u16(),
            start_time.elapsed().as_millis(),
            body.len()
        );

        if !status.is_success() {
            return Err(FridayError::upstream(
                upstream.service.as_str(),
                status.as_u16(),
                body,
            ));
        }

        extract_content(&body)
            .ok_or_else(|| FridayError::invalid_upstream_response(upstream.service.as_str()))
    }
}

/// Print a settings table for the configured upstreams at startup
pub fn render_settings(upstreams: &[&UpstreamConfig]) {
    fn pad(s: &str, w: usize) -> String {
        let mut out: String = s.chars().take(w).collect();
        let len = out.chars().count();
        out.push_str(&" ".repeat(w - len));
        out
    }

    let color = "\x1b[34m";
    let reset = "\x1b[0m";
    let rule = format!("{}+{}+{}", color, "-".repeat(78), reset);
    println!("{}", rule);
    println!(
        "{}|{}|{}|{}|{}",
        color,
        pad("Service", 10),
        pad("Model", 20),
        pad("Key", 46),
        reset
    );
    println!("{}+{}+{}", color, "=".repeat(78), reset);
    for u in upstreams {
        let key_state = if std::env::var(&u.api_key_env).is_ok() {
            format!("{} set", u.api_key_env)
        } else {
            format!("{} <not set>", u.api_key_env)
        };
        println!(
            "{}|{}|{}|{}|{}",
            color,
            pad(&u.service, 10),
            pad(&u.model, 20),
            pad(&key_state, 46),
            reset
        );
    }
    println!("{}", rule);
}
