//! Types used by the verification service

use serde::{Deserialize, Serialize};

/// A rendered message ready for the mail transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMail {
    pub recipient: String,
    pub recipient_name: String,
    pub subject: String,
    pub html_body: String,
}

/// Result of visiting a confirmation link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfirmOutcome {
    /// The verified flag was flipped by this call
    Confirmed,
    /// The account was verified before this call
    AlreadyConfirmed,
}
