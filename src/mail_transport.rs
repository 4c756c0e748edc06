use crate::domain::EmailAddress;
use crate::utils::error_chain_fmt;

/// The mailbox every outgoing message is sent from, e.g. `"Afnuz Academy" <hello@...>`.
#[derive(Debug, Clone)]
pub struct Sender {
    pub name: String,
    pub address: EmailAddress,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" <{}>", self.name, self.address)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

#[derive(thiserror::Error)]
pub enum MailError {
    #[error("The email API request failed")]
    Api(#[from] reqwest::Error),
    #[error("The SMTP relay did not accept the message")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("Could not build the outgoing message")]
    InvalidMessage(#[source] anyhow::Error),
    #[error("The SMTP send task did not complete")]
    Interrupted(#[from] tokio::task::JoinError),
}

impl std::fmt::Debug for MailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Something that can hand a message over for delivery.
///
/// `Ok(())` means the collaborator accepted the message; nothing is retried.
#[async_trait::async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}
