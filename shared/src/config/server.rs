//! Server configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Maximum payload size in bytes (bounds avatar uploads)
    #[serde(default = "default_max_payload_size")]
    pub max_payload_size: usize,

    /// Externally reachable base URL, used in links sent by email.
    /// Never derived from request headers.
    #[serde(default)]
    pub public_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 8080,
            max_payload_size: default_max_payload_size(),
            public_url: None,
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("SERVER_HOST").unwrap_or(defaults.host),
            port: env_or("SERVER_PORT", defaults.port),
            max_payload_size: env_or("SERVER_MAX_PAYLOAD_SIZE", defaults.max_payload_size),
            public_url: std::env::var("SERVER_PUBLIC_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
        }
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base URL for outbound links, without a trailing slash
    ///
    /// Falls back to `http://<host>:<port>` when `SERVER_PUBLIC_URL` is unset.
    pub fn public_url(&self) -> String {
        match &self.public_url {
            Some(url) => url.trim().trim_end_matches('/').to_string(),
            None => format!("http://{}", self.bind_address()),
        }
    }
}

fn default_max_payload_size() -> usize {
    5 * 1024 * 1024 // 5 MiB
}
