//! SMTP mail transport using lettre.
//!
//! Delivers the confirmation emails rendered by the verification service.
//! Connection and protocol failures are reported to the caller once; there
//! is no retry and no send timeout beyond lettre's defaults.

use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use cm_core::errors::DispatchError;
use cm_core::services::verification::{MailTransport, OutboundMail};
use cm_shared::config::MailConfig;

use crate::InfrastructureError;

/// Mail transport backed by an SMTP relay
pub struct SmtpMailTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
}

impl SmtpMailTransport {
    /// Build the transport from mail settings.
    ///
    /// Implicit TLS is used when `use_tls` is set, STARTTLS otherwise. No
    /// connection is opened until the first message is sent.
    pub fn new(config: &MailConfig) -> Result<Self, InfrastructureError> {
        let from_address: Address = config
            .from_address
            .parse()
            .map_err(|e| InfrastructureError::Config(format!("Invalid MAIL_FROM address: {}", e)))?;
        let sender = Mailbox::new(Some(config.from_name.clone()), from_address);

        let builder = if config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.server)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.server)
        }
        .map_err(|e| InfrastructureError::Mail(e.to_string()))?;

        let mut builder = builder.port(config.port);
        if config.has_credentials() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        tracing::info!(
            server = %config.server,
            port = config.port,
            tls = config.use_tls,
            "SMTP mail transport configured"
        );

        Ok(Self {
            mailer: builder.build(),
            sender,
        })
    }

    /// Assemble the MIME message for `mail`
    pub fn build_message(&self, mail: &OutboundMail) -> Result<Message, DispatchError> {
        let address: Address = mail
            .recipient
            .parse()
            .map_err(|e: lettre::address::AddressError| DispatchError::InvalidAddress(e.to_string()))?;
        let recipient = Mailbox::new(Some(mail.recipient_name.clone()), address);

        Message::builder()
            .from(self.sender.clone())
            .to(recipient)
            .subject(mail.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(mail.html_body.clone())
            .map_err(|e| DispatchError::Build(e.to_string()))
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, mail: OutboundMail) -> Result<(), DispatchError> {
        let message = self.build_message(&mail)?;

        self.mailer.send(message).await.map_err(|e| {
            tracing::error!(to = %mail.recipient, error = %e, "SMTP delivery failed");
            DispatchError::Connection(e.to_string())
        })?;

        tracing::info!(to = %mail.recipient, subject = %mail.subject, "Email sent");
        Ok(())
    }
}
