use cm_shared::config::{AppConfig, Environment};
use serde::{Deserialize, Serialize};

/// Runtime configuration of the HTTP server binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            app: AppConfig::from_env(),
        }
    }

    pub fn environment(&self) -> Environment {
        self.app.environment
    }

    pub fn is_development(&self) -> bool {
        self.app.environment.is_development()
    }

    pub fn is_production(&self) -> bool {
        self.app.environment.is_production()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.server.host, self.app.server.port)
    }

    pub fn max_payload_size(&self) -> usize {
        self.app.server.max_payload_size
    }
}
