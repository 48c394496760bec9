//! Configuration for the verification service

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Subject line of the confirmation email
    pub subject: String,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            subject: "Confirm your email".to_string(),
        }
    }
}
