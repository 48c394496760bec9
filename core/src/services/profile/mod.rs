//! Profile service module
//!
//! Reads and updates the profile owned by an account and routes avatar
//! uploads through the avatar service.

mod service;


pub use service::ProfileService;
