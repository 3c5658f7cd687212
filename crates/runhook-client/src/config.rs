//! Client configuration.
//!
//! # Environment Variables
//! - `RUNHOOK_HOST`: Jobs API host, with or without scheme (required)
//! - `RUNHOOK_TOKEN`: bearer token (optional)
//! - `RUNHOOK_TIMEOUT_SECS`: request timeout in seconds (default: 30)

use crate::error::ClientError;

/// Jobs API client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API host, e.g. `https://jobs.example.com`.
    pub host: String,

    /// Bearer token sent with every request.
    pub token: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            token: None,
            timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("RUNHOOK_HOST").unwrap_or(defaults.host),
            token: lookup("RUNHOOK_TOKEN").filter(|t| !t.is_empty()),
            timeout_secs: lookup("RUNHOOK_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }

    /// Builder method to override the host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Builder method to override the token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Base URL without trailing slash. `https://` is assumed when no scheme is given.
    pub fn base_url(&self) -> Result<String, ClientError> {
        let host = self.host.trim().trim_end_matches('/');
        if host.is_empty() {
            return Err(ClientError::Config(
                "Jobs API host is not set (RUNHOOK_HOST)".to_string(),
            ));
        }
        if host.starts_with("http://") || host.starts_with("https://") {
            Ok(host.to_string())
        } else {
            Ok(format!("https://{host}"))
        }
    }
}
