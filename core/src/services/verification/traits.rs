//! Trait for outbound mail integration

use async_trait::async_trait;

use crate::errors::DispatchError;

use super::types::OutboundMail;

/// Outbound mail transport
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Deliver a single message. Connection failures are reported as
    /// `DispatchError::Connection` and are not retried.
    async fn send(&self, mail: OutboundMail) -> Result<(), DispatchError>;
}
