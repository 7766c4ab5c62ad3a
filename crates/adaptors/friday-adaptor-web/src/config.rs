//! Server configuration and persona routing table

use friday_core::{get_env_bool, get_env_int, get_env_or, get_env_timeout, Persona};
use friday_provider_openai::UpstreamConfig;
use std::time::Duration;

/// One persona proxy: `POST /api/<persona.slug>` forwards to `upstream`
#[derive(Debug, Clone)]
pub struct ProxyRoute {
    /// Persona answered by this route
    pub persona: Persona,
    /// Upstream chat-completion service holding the credential
    pub upstream: UpstreamConfig,
}

impl ProxyRoute {
    /// Route `persona` to `upstream`
    pub fn new(persona: Persona, upstream: UpstreamConfig) -> Self {
        Self { persona, upstream }
    }
}

/// Grok via xAI and F.R.I.D.A.Y. via OpenAI, with env overrides applied
pub fn default_routes() -> Vec<ProxyRoute> {
    vec![
        ProxyRoute::new(Persona::grok(), UpstreamConfig::xai_from_env()),
        ProxyRoute::new(Persona::friday(), UpstreamConfig::openai_from_env()),
    ]
}

/// Dashboard server configuration
#[derive(Debug, Clone)]
pub struct DashboardServerConfig {
    /// Server host
    pub host: String,

    /// Server port (0 picks a free port)
    pub port: u16,

    /// Enable permissive CORS
    pub enable_cors: bool,

    /// Serve scrubbed log events at `/logs`
    pub logs_enabled: bool,

    /// Timeout applied to every upstream call
    pub upstream_timeout: Duration,
}

impl Default for DashboardServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 4000,
            enable_cors: true,
            logs_enabled: false,
            upstream_timeout: friday_core::DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl DashboardServerConfig {
    /// Read `FRIDAY_HOST`, `FRIDAY_PORT`, `FRIDAY_CORS`, `FRIDAY_LOGS_ENABLED`
    /// and `FRIDAY_UPSTREAM_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: get_env_or("FRIDAY_HOST", &defaults.host),
            port: get_env_int("FRIDAY_PORT", defaults.port),
            enable_cors: get_env_bool("FRIDAY_CORS", defaults.enable_cors),
            logs_enabled: get_env_bool("FRIDAY_LOGS_ENABLED", defaults.logs_enabled),
            upstream_timeout: get_env_timeout("FRIDAY_UPSTREAM_TIMEOUT_SECS"),
        }
    }

    /// `host:port` to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_routes_order() {
        let routes = default_routes();
        let slugs: Vec<_> = routes.iter().map(|r| r.persona.slug.as_str()).collect();
        assert_eq!(slugs, vec!["grok", "friday"]);
        assert_eq!(routes[1].upstream.api_key_env, "OPENAI_API_KEY");
    }

    #[test]
    fn test_bind_addr() {
        let config = DashboardServerConfig {
            port: 4100,
            ..Default::default()
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:4100");
    }
}
