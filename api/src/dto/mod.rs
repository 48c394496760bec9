//! Request and response bodies of the HTTP boundary

pub mod auth;
pub mod error;
pub mod user;
