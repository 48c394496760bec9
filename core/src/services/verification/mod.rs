//! Verification service module for email confirmation
//!
//! Sends a confirmation link carrying an email verification token on
//! registration, and marks the account verified when the link is visited.

mod config;
mod service;
mod template;
mod traits;
mod types;


pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use template::{confirmation_link, render_verification_email, CONFIRM_EMAIL_PATH};
pub use traits::MailTransport;
pub use types::{ConfirmOutcome, OutboundMail};
