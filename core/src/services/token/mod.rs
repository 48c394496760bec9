//! Token service module for JWT management
//!
//! Mints and validates the three token kinds used by the API:
//! - short-lived access tokens presented on every request
//! - long-lived refresh tokens exchanged for a new pair
//! - single-purpose email verification tokens embedded in confirmation links

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
