//! Birthday email dispatch
//!
//! `MailTransport` opens one authenticated session per batch and
//! `MailSession` sends through it. The session is released when dropped,
//! so it never outlives `Notifier::notify`.

mod smtp;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::{SendError, TransportInitError};
use crate::models::{Delivery, DeliveryStatus, NotifyReport, Record};
use crate::utils::message_formatter::MessageTemplate;
pub use smtp::SmtpMailer;

/// Opens authenticated sessions to a mail service
#[async_trait]
pub trait MailTransport: Send + Sync {
    type Session: MailSession;

    /// Connect and authenticate; nothing can be sent if this fails
    async fn open(&self) -> Result<Self::Session, TransportInitError>;
}

/// An open, authenticated channel to a mail service
#[async_trait]
pub trait MailSession: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), SendError>;
}

/// Sends one templated message per matched record
pub struct Notifier<'a, T: MailTransport> {
    transport: &'a T,
    template: &'a MessageTemplate,
}

impl<'a, T: MailTransport> Notifier<'a, T> {
    pub fn new(transport: &'a T, template: &'a MessageTemplate) -> Self {
        Self {
            transport,
            template,
        }
    }

    /// Send to every match over a single session
    ///
    /// Only session setup is fatal. A failed message is recorded in the
    /// report and the remaining matches are still sent.
    pub async fn notify(&self, matches: &[Record]) -> Result<NotifyReport, TransportInitError> {
        let session = self.transport.open().await?;
        let mut report = NotifyReport::default();

        for record in matches {
            let body = self.template.render_body(&record.name);
            let status = match session
                .send(&record.email, self.template.subject(), &body)
                .await
            {
                Ok(()) => {
                    info!("Email sent to {} ({})", record.name, record.email);
                    DeliveryStatus::Sent
                }
                Err(e) => {
                    warn!("Failed to send email to {} ({}): {}", record.name, record.email, e);
                    DeliveryStatus::Failed(e.to_string())
                }
            };

            report.record(Delivery {
                name: record.name.clone(),
                email: record.email.clone(),
                status,
            });
        }

        Ok(report)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeTransport;
    use super::*;
    use crate::models::BirthDate;
    use pretty_assertions::assert_eq;

    fn record(name: &str, email: &str) -> Record {
        Record {
            row: 2,
            name: name.to_string(),
            email: email.to_string(),
            birth_date: BirthDate::Text("1990-03-15".to_string()),
        }
    }

    #[tokio::test]
    async fn test_notify_sends_one_message_per_match() {
        let transport = FakeTransport::default();
        let template = MessageTemplate::birthday("Acme");
        let notifier = Notifier::new(&transport, &template);

        let report = notifier
            .notify(&[record("Ana", "ana@x.com"), record("Bo", "bo@x.com")])
            .await
            .unwrap();

        assert_eq!(report.sent_count(), 2);
        let outbox = transport.outbox();
        assert_eq!(outbox.opened, 1);
        assert_eq!(outbox.closed, 1);
        assert_eq!(outbox.sent.len(), 2);
        assert!(outbox.sent.iter().all(|m| m.subject == "Happy Birthday!"));
        assert_eq!(outbox.sent[1].to, "bo@x.com");
        assert!(outbox.sent[1].body.starts_with("Hi Bo,"));
        assert!(outbox.sent[1].body.contains("Acme"));
    }

    #[tokio::test]
    async fn test_notify_isolates_failed_send() {
        let transport = FakeTransport::rejecting(&["bo@x.com"]);
        let template = MessageTemplate::birthday("Acme");
        let notifier = Notifier::new(&transport, &template);

        let report = notifier
            .notify(&[
                record("Ana", "ana@x.com"),
                record("Bo", "bo@x.com"),
                record("Cy", "cy@x.com"),
            ])
            .await
            .unwrap();

        let statuses: Vec<&DeliveryStatus> =
            report.deliveries().iter().map(|d| &d.status).collect();
        assert_eq!(
            statuses,
            vec![
                &DeliveryStatus::Sent,
                &DeliveryStatus::Failed(
                    "transport rejected message: 550 mailbox unavailable".to_string()
                ),
                &DeliveryStatus::Sent,
            ]
        );
        assert_eq!(report.failed_count(), 1);
        assert_eq!(transport.outbox().sent.len(), 2);
    }

    #[tokio::test]
    async fn test_notify_fails_fast_without_session() {
        let transport = FakeTransport::refusing();
        let template = MessageTemplate::birthday("Acme");
        let notifier = Notifier::new(&transport, &template);

        let result = notifier.notify(&[record("Ana", "ana@x.com")]).await;

        assert!(matches!(result, Err(TransportInitError::Connect { .. })));
        assert!(transport.outbox().sent.is_empty());
    }
}
