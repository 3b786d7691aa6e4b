//! Outbound mail for contact-form notifications.
//!
//! Uses SMTP via lettre for delivery. Messages are plain text.

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use std::time::Duration;
use thiserror::Error;

use honest_shops_core::Email;

use crate::config::EmailConfig;

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum MailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// A plain-text message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: Email,
    pub reply_to: Option<Email>,
    pub subject: String,
    pub body: String,
}

/// Delivers outbound mail.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Send a single message. No retries.
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError>;
}

/// SMTP mailer over a STARTTLS relay.
#[derive(Clone)]
pub struct SmtpMailer {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Create a new mailer from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the relay host is invalid or the sender address
    /// is rejected by lettre.
    pub fn new(config: &EmailConfig, timeout: Duration) -> Result<Self, MailError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .timeout(Some(timeout))
            .build();

        let from = Mailbox::new(
            Some(config.from_name.clone()),
            to_address(&config.from_address)?,
        );

        Ok(Self { mailer, from })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(Mailbox::new(None, to_address(&email.to)?))
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_PLAIN);

        if let Some(reply_to) = &email.reply_to {
            builder = builder.reply_to(Mailbox::new(None, to_address(reply_to)?));
        }

        let message = builder.body(email.body)?;
        self.mailer.send(message).await?;

        tracing::info!(to = %email.to, subject = %email.subject, "Email sent successfully");
        Ok(())
    }
}

fn to_address(email: &Email) -> Result<lettre::Address, MailError> {
    email
        .as_str()
        .parse()
        .map_err(|_| MailError::InvalidAddress(email.to_string()))
}
