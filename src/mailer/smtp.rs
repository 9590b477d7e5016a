//! SMTP delivery through lettre
use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use tracing::{debug, info};

use super::{MailSession, MailTransport};
use crate::config::{SenderCredentials, SmtpSettings, TlsMode};
use crate::error::{SendError, TransportInitError};

/// SMTP relay configured from the sender account
pub struct SmtpMailer {
    settings: SmtpSettings,
    credentials: SenderCredentials,
}

impl SmtpMailer {
    pub fn new(settings: SmtpSettings, credentials: SenderCredentials) -> Self {
        Self {
            settings,
            credentials,
        }
    }

    fn build_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, TransportInitError> {
        let host = self.settings.host.as_str();
        let relay_error = |e: lettre::transport::smtp::Error| TransportInitError::Relay {
            host: host.to_string(),
            reason: e.to_string(),
        };

        let builder = match self.settings.tls {
            TlsMode::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host).map_err(relay_error)?
            }
            TlsMode::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(host).map_err(relay_error)?,
            // No TLS at all; only for local relays such as Mailpit
            TlsMode::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host),
        };

        Ok(builder
            .port(self.settings.port)
            .credentials(Credentials::new(
                self.credentials.account.clone(),
                self.credentials.password.clone(),
            ))
            .build())
    }
}

/// Authenticated SMTP connection shared by every message of a batch
pub struct SmtpSession {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

#[async_trait]
impl MailTransport for SmtpMailer {
    type Session = SmtpSession;

    async fn open(&self) -> Result<SmtpSession, TransportInitError> {
        let from = self
            .credentials
            .account
            .parse::<Mailbox>()
            .map_err(|e| TransportInitError::InvalidSender {
                address: self.credentials.account.clone(),
                reason: e.to_string(),
            })?;

        let transport = self.build_transport()?;
        let connect_error = |reason: String| TransportInitError::Connect {
            host: self.settings.host.clone(),
            reason,
        };

        // Throwaway connection that checks the relay and credentials. Sends
        // authenticate again on a connection of their own from the pool.
        match transport.test_connection().await {
            Ok(true) => {
                info!(
                    "Connected to {}:{} as {}",
                    self.settings.host, self.settings.port, self.credentials.account
                );
                Ok(SmtpSession { transport, from })
            }
            Ok(false) => Err(connect_error("server did not accept the connection".to_string())),
            Err(e) => Err(connect_error(e.to_string())),
        }
    }
}

#[async_trait]
impl MailSession for SmtpSession {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), SendError> {
        let recipient = to.parse::<Mailbox>().map_err(|e| SendError::InvalidAddress {
            address: to.to_string(),
            reason: e.to_string(),
        })?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| SendError::Build(e.to_string()))?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| SendError::Transport(e.to_string()))?;

        debug!("SMTP accepted message to {}: {:?}", to, response.code());
        Ok(())
    }
}
