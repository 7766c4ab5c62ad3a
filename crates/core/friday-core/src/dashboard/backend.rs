//! Persona backends: the proxied HTTP client and the offline simulation

use crate::error::PersonaError;
use crate::types::{Persona, ProxyReply, ProxyRequest};
use crate::{FridayError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Something that can answer a query on behalf of one persona
#[async_trait]
pub trait PersonaBackend: Send + Sync {
    /// Persona this backend answers for
    fn persona(&self) -> &Persona;

    /// Answer `input`, returning the unlabeled answer text
    async fn ask(&self, input: &str) -> std::result::Result<String, PersonaError>;
}

/// Calls a persona's server-side proxy endpoint (`POST <base>/api/<slug>`)
///
/// The credential for the upstream service never reaches this client; it only
/// talks to the proxy.
#[derive(Clone)]
pub struct ProxyPersonaClient {
    persona: Persona,
    endpoint: String,
    client: Client,
}

impl ProxyPersonaClient {
    /// Create a client for `persona` against the proxy at `base_url`
    pub fn new(persona: Persona, base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FridayError::Network)?;
        Ok(Self::with_client(persona, base_url, client))
    }

    /// Create a client reusing an existing HTTP connection pool
    pub fn with_client(persona: Persona, base_url: &str, client: Client) -> Self {
        let endpoint = format!("{}{}", base_url.trim_end_matches('/'), persona.route());
        Self {
            persona,
            endpoint,
            client,
        }
    }

    /// Full URL this client posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PersonaBackend for ProxyPersonaClient {
    fn persona(&self) -> &Persona {
        &self.persona
    }

    async fn ask(&self, input: &str) -> std::result::Result<String, PersonaError> {
        let name = &self.persona.name;
        debug!("[{}] POST {} (input_len={})", name, self.endpoint, input.len());

        let resp = self
            .client
            .post(&self.endpoint)
            .json(&ProxyRequest::new(input))
            .send()
            .await
            .map_err(|e| {
                warn!("[{}] proxy request failed: {}", name, e);
                PersonaError::unreachable(name.as_str())
            })?;

        let status = resp.status();
        let reply: ProxyReply = resp.json().await.map_err(|e| {
            warn!("[{}] unreadable proxy reply (status {}): {}", name, status, e);
            PersonaError::unreachable(name.as_str())
        })?;

        if let Some(message) = reply.error {
            return Err(PersonaError::new(name.as_str(), message));
        }
        reply
            .response
            .ok_or_else(|| PersonaError::unreachable(name.as_str()))
    }
}

/// Default delay of simulated answers
pub const SIMULATED_DELAY: Duration = Duration::from_secs(1);

/// Offline stand-in that answers with a fixed placeholder after a delay
#[derive(Clone)]
pub struct SimulatedPersona {
    persona: Persona,
    delay: Duration,
    reply: fn(&str) -> String,
}

impl SimulatedPersona {
    /// Placeholder Grok pointing the user at the xAI API setup
    pub fn grok(delay: Duration) -> Self {
        Self {
            persona: Persona::grok(),
            delay,
            reply: |input| {
                format!(
                    "Query \"{}\" received. Configure xAI API at https://x.ai/api for real responses.",
                    input
                )
            },
        }
    }

    /// Placeholder F.R.I.D.A.Y. pointing the user at the OpenAI API setup
    pub fn friday(delay: Duration) -> Self {
        Self {
            persona: Persona::friday(),
            delay,
            reply: |input| {
                format!(
                    "\"{}\"? Working on it, boss. Set up OpenAI API for my full Stark-level wit.",
                    input
                )
            },
        }
    }
}

#[async_trait]
impl PersonaBackend for SimulatedPersona {
    fn persona(&self) -> &Persona {
        &self.persona
    }

    async fn ask(&self, input: &str) -> std::result::Result<String, PersonaError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok((self.reply)(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::net::SocketAddr;

    async fn start_proxy_stub(status: StatusCode, body: Value) -> SocketAddr {
        let app = Router::new().route(
            "/api/grok",
            post(move |Json(req): Json<Value>| {
                let body = body.clone();
                async move {
                    assert!(req["input"].is_string());
                    (status, Json(body))
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn client_for(addr: SocketAddr) -> ProxyPersonaClient {
        ProxyPersonaClient::new(
            Persona::grok(),
            &format!("http://{}/", addr),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_proxy_client_returns_response() {
        let addr = start_proxy_stub(StatusCode::OK, json!({"response": "All clear."})).await;
        let client = client_for(addr);

        assert_eq!(client.endpoint(), format!("http://{}/api/grok", addr));
        assert_eq!(client.ask("status report").await.unwrap(), "All clear.");
    }

    #[tokio::test]
    async fn test_proxy_client_surfaces_reported_error() {
        let addr = start_proxy_stub(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": "rate limited"}),
        )
        .await;
        let err = client_for(addr).ask("hello").await.unwrap_err();

        assert_eq!(err.to_string(), "Grok error: rate limited");
    }

    #[tokio::test]
    async fn test_proxy_client_falls_back_without_fields() {
        let addr = start_proxy_stub(StatusCode::OK, json!({"unexpected": true})).await;
        let err = client_for(addr).ask("hello").await.unwrap_err();

        assert_eq!(err, PersonaError::unreachable("Grok"));
    }

    #[tokio::test]
    async fn test_proxy_client_falls_back_when_unreachable() {
        // Bind then drop to get a port nobody listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(addr).ask("hello").await.unwrap_err();
        assert_eq!(err, PersonaError::unreachable("Grok"));
    }

    #[tokio::test]
    async fn test_simulated_personas() {
        let grok = SimulatedPersona::grok(Duration::ZERO);
        let friday = SimulatedPersona::friday(Duration::ZERO);

        assert_eq!(
            grok.ask("hi").await.unwrap(),
            "Query \"hi\" received. Configure xAI API at https://x.ai/api for real responses."
        );
        assert!(friday.ask("hi").await.unwrap().starts_with("\"hi\"? Working on it, boss."));
        assert_eq!(friday.persona().name, "F.R.I.D.A.Y.");
    }
}
