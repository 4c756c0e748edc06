//! SMTP delivery through lettre.

use std::time::Duration;

use anyhow::Context;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::{self, SmtpTransportBuilder};
use lettre::{Message, SmtpTransport, Transport};
use secrecy::{ExposeSecret, Secret};

use crate::mail_transport::{MailError, MailTransport, OutgoingEmail, Sender};

/// Port where the connection is TLS from the first byte (SMTPS).
const IMPLICIT_TLS_PORT: u16 = 465;

#[derive(Clone)]
pub struct SmtpMailer {
    mailer: SmtpTransport,
    from: Mailbox,
}

impl SmtpMailer {
    /// Authenticated relay, or a plain connection (MailDev and the like) when
    /// no credentials are configured. The relay upgrades a plaintext session
    /// with STARTTLS, except on port 465 where it speaks TLS right away.
    pub fn new(
        host: &str,
        port: u16,
        username: &str,
        password: &Secret<String>,
        sender: &Sender,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let mailer = if username.is_empty() || password.expose_secret().is_empty() {
            tracing::info!(
                smtp_host = %host,
                smtp_port = port,
                "SMTP credentials not configured, using an unauthenticated connection"
            );
            SmtpTransport::builder_dangerous(host)
                .port(port)
                .timeout(Some(timeout))
                .build()
        } else {
            let credentials =
                Credentials::new(username.to_string(), password.expose_secret().clone());
            relay_builder(host, port)
                .context("Failed to create the SMTP relay")?
                .port(port)
                .credentials(credentials)
                .timeout(Some(timeout))
                .build()
        };

        let address = sender
            .address
            .as_ref()
            .parse()
            .context("The sender address is not a valid mailbox")?;
        let from = Mailbox::new(Some(sender.name.clone()), address);

        Ok(Self { mailer, from })
    }

    fn build_message(&self, email: &OutgoingEmail) -> Result<Message, MailError> {
        let to: Mailbox = email
            .to
            .parse()
            .with_context(|| format!("{} is not a deliverable mailbox", email.to))
            .map_err(MailError::InvalidMessage)?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.as_str())
            .multipart(MultiPart::alternative_plain_html(
                email.text_body.clone(),
                email.html_body.clone(),
            ))
            .context("Failed to build the email message")
            .map_err(MailError::InvalidMessage)
    }
}

fn relay_builder(host: &str, port: u16) -> Result<SmtpTransportBuilder, smtp::Error> {
    if port == IMPLICIT_TLS_PORT {
        SmtpTransport::relay(host)
    } else {
        SmtpTransport::starttls_relay(host)
    }
}

#[async_trait::async_trait]
impl MailTransport for SmtpMailer {
    #[tracing::instrument(name = "Sending an email over SMTP", skip_all, fields(recipient = %email.to))]
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let message = self.build_message(email)?;
        let mailer = self.mailer.clone();

        // lettre's SmtpTransport blocks on the socket.
        tokio::task::spawn_blocking(move || mailer.send(&message)).await??;
        Ok(())
    }
}
