//! The set of personas asked on every submission

use super::backend::{PersonaBackend, ProxyPersonaClient, SimulatedPersona};
use crate::error::PersonaError;
use crate::types::{AnswerFragment, CombinedResponse, Persona};
use crate::{FridayError, Result};
use futures_util::future::join_all;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Ordered personas; their answers are always combined in this order
#[derive(Clone)]
pub struct PersonaPanel {
    backends: Vec<Arc<dyn PersonaBackend>>,
}

impl PersonaPanel {
    /// Panel over `backends` in answer order. At least one backend is required.
    pub fn new(backends: Vec<Arc<dyn PersonaBackend>>) -> Result<Self> {
        if backends.is_empty() {
            return Err(FridayError::config(
                "A persona panel needs at least one persona",
            ));
        }
        Ok(Self { backends })
    }

    /// Grok then F.R.I.D.A.Y., both through the proxy at `base_url`
    pub fn proxied(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FridayError::Network)?;
        Self::new(vec![
            Arc::new(ProxyPersonaClient::with_client(
                Persona::grok(),
                base_url,
                client.clone(),
            )),
            Arc::new(ProxyPersonaClient::with_client(
                Persona::friday(),
                base_url,
                client,
            )),
        ])
    }

    /// Offline placeholders for Grok then F.R.I.D.A.Y.
    pub fn simulated(delay: Duration) -> Self {
        Self {
            backends: vec![
                Arc::new(SimulatedPersona::grok(delay)),
                Arc::new(SimulatedPersona::friday(delay)),
            ],
        }
    }

    /// Personas in answer order
    pub fn personas(&self) -> impl Iterator<Item = &Persona> {
        self.backends.iter().map(|b| b.persona())
    }

    /// Ask every persona concurrently and combine the answers in panel order.
    ///
    /// Fails with the first failing persona in panel order, independent of
    /// which call finished first.
    pub async fn gather(&self, input: &str) -> std::result::Result<CombinedResponse, PersonaError> {
        let answers = join_all(self.backends.iter().map(|b| b.ask(input))).await;

        let mut fragments = Vec::with_capacity(answers.len());
        for (backend, answer) in self.backends.iter().zip(answers) {
            fragments.push(AnswerFragment::new(backend.persona().name.clone(), answer?));
        }
        Ok(CombinedResponse::from_fragments(&fragments))
    }
}
