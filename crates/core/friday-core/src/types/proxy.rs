//! Wire types of the persona proxy endpoint

use serde::{Deserialize, Serialize};

/// Request body of `POST /api/<persona>`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProxyRequest {
    /// Query text; optional on the wire so a missing field can be reported
    #[serde(default)]
    pub input: Option<String>,
}

impl ProxyRequest {
    /// Request carrying `input`
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: Some(input.into()),
        }
    }
}

/// Success body of the proxy endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyResponse {
    /// Upstream answer text, unmodified
    pub response: String,
}

/// Failure body of the proxy endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProxyErrorBody {
    /// Human-readable failure message
    pub error: String,
}

/// Either shape the proxy may answer with, as read by the dashboard client
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProxyReply {
    /// Answer text on success
    #[serde(default)]
    pub response: Option<String>,
    /// Failure message reported by the proxy
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proxy_request_missing_input() {
        let req: ProxyRequest = serde_json::from_str("{}").unwrap();
        assert!(req.input.is_none());

        let req: ProxyRequest = serde_json::from_str(r#"{"input":null}"#).unwrap();
        assert!(req.input.is_none());
    }

    #[test]
    fn test_proxy_reply_reads_error() {
        let reply: ProxyReply = serde_json::from_str(r#"{"error":"rate limited"}"#).unwrap();
        assert_eq!(reply.error.as_deref(), Some("rate limited"));
        assert!(reply.response.is_none());
    }
}
