//! Shared utilities and common types for the Contacts API server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The JSON error envelope returned by every endpoint
//! - Input validation helpers (email syntax and normalisation)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AvatarConfig, DatabaseConfig, Environment, JwtConfig, LoggingConfig, MailConfig,
    ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use utils::validation;
