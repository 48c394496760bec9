//! In-memory implementations of the core ports.
//!
//! Used by the api integration tests and for running the server without
//! MySQL or SMTP.

mod account_repository;
mod avatar_store;
mod mail_transport;
mod profile_repository;

pub use account_repository::InMemoryAccountRepository;
pub use avatar_store::InMemoryAvatarStore;
pub use mail_transport::RecordingMailTransport;
pub use profile_repository::InMemoryProfileRepository;
