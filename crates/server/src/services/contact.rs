//! Contact-form notifications.
//!
//! A submission is validated, rendered to a plain-text message and handed to
//! the configured [`MailTransport`] exactly once.

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use honest_shops_core::Email;

use super::email::{MailError, MailTransport, OutboundEmail};

const SUBJECT: &str = "New Contact Form Submission";

/// Errors that can occur when submitting the contact form.
#[derive(Debug, Error)]
pub enum ContactError {
    /// The submission failed validation. The message is safe to show.
    #[error("{0}")]
    Validation(&'static str),

    /// The notification could not be delivered.
    #[error("delivery failed: {0}")]
    Delivery(String),
}

impl From<MailError> for ContactError {
    fn from(err: MailError) -> Self {
        Self::Delivery(err.to_string())
    }
}

/// A contact-form submission as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// Forwards contact-form submissions by email.
#[derive(Clone)]
pub struct ContactNotifier {
    transport: Option<Arc<dyn MailTransport>>,
    recipient: Option<Email>,
}

impl ContactNotifier {
    /// Create a notifier. Delivery is disabled unless both a transport and a
    /// recipient are supplied.
    #[must_use]
    pub fn new(transport: Option<Arc<dyn MailTransport>>, recipient: Option<Email>) -> Self {
        Self {
            transport,
            recipient,
        }
    }

    /// Validate a submission and send the notification.
    ///
    /// # Errors
    ///
    /// Returns `ContactError::Validation` for missing fields or an implausible
    /// address, and `ContactError::Delivery` if mail is not configured or the
    /// transport fails.
    pub async fn submit_contact_form(&self, form: &ContactSubmission) -> Result<(), ContactError> {
        let (name, email, message) = match (
            non_blank(form.name.as_deref()),
            non_blank(form.email.as_deref()),
            non_blank(form.message.as_deref()),
        ) {
            (Some(name), Some(email), Some(message)) => (name, email, message),
            _ => {
                return Err(ContactError::Validation(
                    "name, email and message are required",
                ));
            }
        };
        let email = Email::parse(email)
            .map_err(|_| ContactError::Validation("A valid email address is required"))?;

        let (Some(transport), Some(recipient)) = (&self.transport, &self.recipient) else {
            return Err(ContactError::Delivery("mail is not configured".to_string()));
        };

        let notification = OutboundEmail {
            to: recipient.clone(),
            subject: SUBJECT.to_string(),
            body: notification_body(name, &email, message),
            reply_to: Some(email),
        };

        transport.send(notification).await?;
        Ok(())
    }
}

/// The value as submitted, if it has any non-whitespace content.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn notification_body(name: &str, email: &Email, message: &str) -> String {
    format!("Name: {name}\nEmail: {email}\n\nMessage:\n{message}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<OutboundEmail>>,
    }

    #[async_trait]
    impl MailTransport for RecordingTransport {
        async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
            self.sent.lock().unwrap().push(email);
            Ok(())
        }
    }

    struct FailingTransport;

    #[async_trait]
    impl MailTransport for FailingTransport {
        async fn send(&self, _email: OutboundEmail) -> Result<(), MailError> {
            Err(MailError::InvalidAddress("relay refused".to_string()))
        }
    }

    fn submission(name: &str, email: &str, message: &str) -> ContactSubmission {
        ContactSubmission {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            message: Some(message.to_string()),
        }
    }

    fn recipient() -> Option<Email> {
        Some(Email::parse("team@honestshops.org").unwrap())
    }

    #[tokio::test]
    async fn test_submission_is_forwarded() {
        let transport = Arc::new(RecordingTransport::default());
        let notifier = ContactNotifier::new(Some(transport.clone()), recipient());

        notifier
            .submit_contact_form(&submission(
                "Ada",
                "ada@example.org",
                "Please list my shop.",
            ))
            .await
            .unwrap();

        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to.as_str(), "team@honestshops.org");
        assert_eq!(sent[0].reply_to.as_ref().unwrap().as_str(), "ada@example.org");
        assert_eq!(sent[0].subject, "New Contact Form Submission");
        assert_eq!(
            sent[0].body,
            "Name: Ada\nEmail: ada@example.org\n\nMessage:\nPlease list my shop."
        );
    }

    #[tokio::test]
    async fn test_submitted_text_is_not_altered() {
        let transport = Arc::new(RecordingTransport::default());
        let notifier = ContactNotifier::new(Some(transport.clone()), recipient());

        notifier
            .submit_contact_form(&submission(
                " Ada ",
                "ada@example.org",
                "  indented line\nsecond\n\n",
            ))
            .await
            .unwrap();

        let sent = transport.sent.lock().unwrap();
        assert_eq!(
            sent[0].body,
            "Name:  Ada \nEmail: ada@example.org\n\nMessage:\n  indented line\nsecond\n\n"
        );
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let transport = Arc::new(RecordingTransport::default());
        let notifier = ContactNotifier::new(Some(transport.clone()), recipient());

        for form in [
            ContactSubmission::default(),
            submission("", "ada@example.org", "hi"),
            submission("Ada", "ada@example.org", "   "),
        ] {
            let err = notifier.submit_contact_form(&form).await.unwrap_err();
            assert!(matches!(
                err,
                ContactError::Validation("name, email and message are required")
            ));
        }
        assert!(transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_email() {
        let notifier =
            ContactNotifier::new(Some(Arc::new(RecordingTransport::default())), recipient());

        let err = notifier
            .submit_contact_form(&submission("Ada", "not-an-address", "hi"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ContactError::Validation("A valid email address is required")
        ));
    }

    #[tokio::test]
    async fn test_failing_transport() {
        let notifier = ContactNotifier::new(Some(Arc::new(FailingTransport)), recipient());

        let err = notifier
            .submit_contact_form(&submission("Ada", "ada@example.org", "hi"))
            .await
            .unwrap_err();

        assert!(matches!(err, ContactError::Delivery(_)));
    }

    #[tokio::test]
    async fn test_not_configured() {
        let notifier = ContactNotifier::new(None, None);

        let err = notifier
            .submit_contact_form(&submission("Ada", "ada@example.org", "hi"))
            .await
            .unwrap_err();

        assert!(matches!(err, ContactError::Delivery(_)));
    }
}
