//! Error types for the dashboard core

use thiserror::Error;

/// Main error type for dashboard and proxy operations
#[derive(Debug, Error)]
pub enum FridayError {
    /// Caller omitted the `input` field (or sent it empty)
    #[error("Missing input in request body")]
    MissingInput,

    /// Upstream chat-completion service answered with a non-success status
    #[error("{service} API error: {status} - {body}")]
    Upstream {
        /// Human-readable upstream service name ("OpenAI", "xAI")
        service: String,
        /// Numeric HTTP status returned by the upstream
        status: u16,
        /// Raw upstream error body
        body: String,
    },

    /// Upstream answered successfully but without `choices[0].message.content`
    #[error("Invalid response format from {service} API")]
    InvalidUpstreamResponse {
        /// Human-readable upstream service name
        service: String,
    },

    /// A persona call made by the dashboard client failed
    #[error(transparent)]
    Persona(#[from] PersonaError),

    /// Serialization/deserialization error
    #[error("{0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network/HTTP error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Not found error (generic)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Convenient Result type using FridayError
pub type Result<T> = std::result::Result<T, FridayError>;

impl FridayError {
    /// Create an upstream status error
    pub fn upstream(service: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        FridayError::Upstream {
            service: service.into(),
            status,
            body: body.into(),
        }
    }

    /// Create an invalid upstream response error
    pub fn invalid_upstream_response(service: impl Into<String>) -> Self {
        FridayError::InvalidUpstreamResponse {
            service: service.into(),
        }
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        FridayError::Config(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        FridayError::NotFound(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        FridayError::Other(msg.into())
    }
}

/// Message used when a proxy call fails without a reported error
pub const PERSONA_FALLBACK_MESSAGE: &str = "Failed to reach the proxy endpoint";

/// Failure of a single persona call, as shown to the dashboard user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{persona} error: {message}")]
pub struct PersonaError {
    /// Display name of the persona whose call failed
    pub persona: String,
    /// Proxy-reported error, or the fallback message
    pub message: String,
}

impl PersonaError {
    /// Create a persona error with an explicit message
    pub fn new(persona: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            message: message.into(),
        }
    }

    /// Create a persona error carrying the fixed fallback message
    pub fn unreachable(persona: impl Into<String>) -> Self {
        Self::new(persona, PERSONA_FALLBACK_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FridayError::MissingInput.to_string(),
            "Missing input in request body"
        );

        let err = FridayError::upstream("OpenAI", 401, "{\"error\":\"bad key\"}");
        assert_eq!(
            err.to_string(),
            "OpenAI API error: 401 - {\"error\":\"bad key\"}"
        );

        let err = FridayError::invalid_upstream_response("xAI");
        assert_eq!(err.to_string(), "Invalid response format from xAI API");
    }

    #[test]
    fn test_persona_error_display() {
        let err = PersonaError::new("Grok", "rate limited");
        assert_eq!(err.to_string(), "Grok error: rate limited");

        let err = PersonaError::unreachable("F.R.I.D.A.Y.");
        assert_eq!(
            err.to_string(),
            "F.R.I.D.A.Y. error: Failed to reach the proxy endpoint"
        );

        let wrapped: FridayError = err.clone().into();
        assert_eq!(wrapped.to_string(), err.to_string());
    }
}
