//! # Infrastructure Layer
//!
//! Concrete implementations of the ports declared in `cm_core`.
//!
//! ## Architecture
//!
//! - **Database**: MySQL repositories and migrations using SQLx
//! - **Mail**: SMTP transport using lettre
//! - **Storage**: filesystem avatar store
//! - **Gravatar**: avatar URL lookup at registration
//! - **Memory**: in-memory doubles of every port, for tests and local runs
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Gravatar avatar locator
pub mod gravatar;

/// Outbound mail transports
pub mod mail;

/// In-memory implementations of the core ports
pub mod memory;

/// Avatar file storage
pub mod storage;

pub use gravatar::GravatarLocator;
pub use mail::SmtpMailTransport;
pub use memory::{
    InMemoryAccountRepository, InMemoryAvatarStore, InMemoryProfileRepository,
    RecordingMailTransport,
};
pub use storage::FsAvatarStore;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail transport setup error
    #[error("Mail error: {0}")]
    Mail(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
