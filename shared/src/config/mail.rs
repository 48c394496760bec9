//! Outbound mail configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// SMTP transport configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// SMTP server hostname
    pub server: String,

    /// SMTP server port
    pub port: u16,

    /// SMTP username
    pub username: String,

    /// SMTP password
    #[serde(skip_serializing)]
    pub password: String,

    /// RFC 5322 "From" address
    pub from_address: String,

    /// Display name shown next to the sender address
    pub from_name: String,

    /// Connect with implicit TLS (otherwise STARTTLS)
    pub use_tls: bool,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            server: String::from("localhost"),
            port: 465,
            username: String::new(),
            password: String::new(),
            from_address: String::from("noreply@localhost"),
            from_name: String::from("Rest API Application"),
            use_tls: true,
        }
    }
}

impl MailConfig {
    /// Create from environment variables
    ///
    /// | Variable         | Default                  |
    /// |------------------|--------------------------|
    /// | `MAIL_SERVER`    | `localhost`              |
    /// | `MAIL_PORT`      | `465`                    |
    /// | `MAIL_USERNAME`  | empty                    |
    /// | `MAIL_PASSWORD`  | empty                    |
    /// | `MAIL_FROM`      | `noreply@localhost`      |
    /// | `MAIL_FROM_NAME` | `Rest API Application`   |
    /// | `MAIL_SSL_TLS`   | `true`                   |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server: std::env::var("MAIL_SERVER").unwrap_or(defaults.server),
            port: env_or("MAIL_PORT", defaults.port),
            username: std::env::var("MAIL_USERNAME").unwrap_or(defaults.username),
            password: std::env::var("MAIL_PASSWORD").unwrap_or(defaults.password),
            from_address: std::env::var("MAIL_FROM").unwrap_or(defaults.from_address),
            from_name: std::env::var("MAIL_FROM_NAME").unwrap_or(defaults.from_name),
            use_tls: env_or("MAIL_SSL_TLS", defaults.use_tls),
        }
    }

    /// Whether SMTP credentials should be sent
    pub fn has_credentials(&self) -> bool {
        !self.username.is_empty()
    }
}
