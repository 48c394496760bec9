//! Mail transport that records instead of sending

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use cm_core::errors::DispatchError;
use cm_core::services::verification::{MailTransport, OutboundMail};

/// Keeps every message it is asked to send. Can be switched to fail like
/// an unreachable SMTP server.
#[derive(Clone, Default)]
pub struct RecordingMailTransport {
    sent: Arc<Mutex<Vec<OutboundMail>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingMailTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose every send fails with a connection error
    pub fn failing() -> Self {
        let transport = Self::default();
        transport.set_failing(true);
        transport
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Messages recorded so far, oldest first
    pub fn sent(&self) -> Vec<OutboundMail> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl MailTransport for RecordingMailTransport {
    async fn send(&self, mail: OutboundMail) -> Result<(), DispatchError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DispatchError::Connection("connection refused".to_string()));
        }
        tracing::debug!(to = %mail.recipient, "Recording outbound mail");
        self.sent
            .lock()
            .map_err(|_| DispatchError::Connection("recorder poisoned".to_string()))?
            .push(mail);
        Ok(())
    }
}
