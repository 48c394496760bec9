//! Account service module
//!
//! Orchestrates the account lifecycle:
//! - registration with avatar lookup, profile creation and email confirmation
//! - re-sending the confirmation email to unverified accounts
//! - password login issuing an access/refresh pair
//! - refresh token rotation and revocation
//! - logout

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use config::AccountServiceConfig;
pub use service::AccountService;
pub use traits::AvatarLocator;
pub use types::{NewAccount, ResendOutcome, PASSWORD_LENGTH, USERNAME_LENGTH};
