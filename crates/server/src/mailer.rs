//! # Mailer Seam
//!
//! Outbound email is an external collaborator: the application only needs a
//! send call it can treat as best-effort. The default [`LogMailer`] writes
//! the message to the log, which is also what integration tests observe.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

/// Errors from an outbound mail transport.
#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Mail transport failed: {0}")]
    Transport(String),
}

/// Outbound mail transport.
#[async_trait]
pub trait Mailer: Send + Sync + std::fmt::Debug {
    /// Sends one message.
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailerError>;
}

/// Default transport: logs the message instead of delivering it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailerError> {
        info!(to, subject, body_len = body.len(), "Mail (log transport)");
        Ok(())
    }
}

/// Sends a message and swallows any transport failure with a warning.
/// Mail never blocks or fails the operation that produced it.
pub async fn send_best_effort(mailer: &dyn Mailer, to: &str, subject: &str, body: &str) {
    if let Err(e) = mailer.send(to, subject, body).await {
        warn!(to, subject, "Failed to send mail: {}", e);
    }
}

/// Builds the verification email for a port admin contact.
#[must_use]
pub fn verification_email(contact_name: &str, token: &str) -> (String, String) {
    let subject = "Verify your PortRay contact email".to_string();
    let body = format!(
        "Hello {},\n\nPlease verify your email address by opening the link below within 24 hours:\n\n\
         /api/verify?token={}\n\nIf you did not expect this email you can ignore it.\n",
        contact_name, token
    );
    (subject, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_mailer_always_succeeds() {
        let mailer = LogMailer;
        assert!(mailer
            .send("contact@port.example", "subject", "body")
            .await
            .is_ok());
    }

    #[test]
    fn test_verification_email_contains_token() {
        let (subject, body) = verification_email("Ada Marlow", "tok123");
        assert!(subject.contains("Verify"));
        assert!(body.contains("Ada Marlow"));
        assert!(body.contains("token=tok123"));
    }
}
