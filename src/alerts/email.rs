//! SMTP email notifier
//!
//! [`EmailNotifier`] wraps a blocking `lettre` SMTP transport. The transport
//! is built once from [`EmailConfig`]; each alert opens its own session.

use super::notifier::Notifier;
use crate::config::EmailConfig;
use crate::error::NotifyError;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::{Message, SmtpTransport, Transport};
use std::time::Duration;

/// Prefix prepended to every alert subject
pub const SUBJECT_PREFIX: &str = "[ServMon Alert]";

/// Upper bound for one SMTP session
const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Delivers alerts by email
pub struct EmailNotifier {
    from: Mailbox,
    to: Mailbox,
    transport: SmtpTransport,
}

impl EmailNotifier {
    /// Build the notifier, parsing addresses and preparing the transport.
    ///
    /// The relay requires STARTTLS and authenticates with PLAIN.
    pub fn new(config: &EmailConfig) -> Result<Self, NotifyError> {
        let from: Mailbox = config.from.parse()?;
        let to: Mailbox = config.to.parse()?;

        let transport = SmtpTransport::starttls_relay(&config.smtp_server)?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .authentication(vec![Mechanism::Plain])
            .timeout(Some(SMTP_TIMEOUT))
            .build();

        Ok(Self { from, to, transport })
    }

    fn build_message(&self, subject: &str, body: &str) -> Result<Message, NotifyError> {
        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(format!("{} {}", SUBJECT_PREFIX, subject))
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| NotifyError::Build(e.to_string()))
    }
}

impl Notifier for EmailNotifier {
    fn send(&self, subject: &str, body: &str) -> Result<(), NotifyError> {
        let message = self.build_message(subject, body)?;
        self.transport.send(&message)?;
        Ok(())
    }

    fn name(&self) -> &str {
        "email"
    }
}
