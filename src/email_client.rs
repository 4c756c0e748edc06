use std::time::Duration;

use crate::mail_transport::{MailError, MailTransport, OutgoingEmail, Sender};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

/// Client for a Postmark-style HTTP email API.
#[derive(Clone)]
pub struct EmailClient {
    base_url: String,
    http_client: reqwest::Client,
    sender: Sender,
    token: Secret<String>,
    timeout: Duration,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequestBody<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text_body: &'a str,
    html_body: &'a str,
}

impl EmailClient {
    pub fn new(base_url: String, sender: Sender, token: Secret<String>, timeout: Duration) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url,
            sender,
            token,
            timeout,
        }
    }

    #[tracing::instrument(name = "Sending an email through the API", skip_all, fields(recipient = %recipient))]
    pub async fn send_email(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<(), reqwest::Error> {
        let url = format!("{}/email", self.base_url);
        let from = self.sender.to_string();
        let body = SendEmailRequestBody {
            from: &from,
            to: recipient,
            text_body,
            subject,
            html_body,
        };

        let _ = self
            .http_client
            .post(url)
            .timeout(self.timeout)
            .json(&body)
            .header("X-Postmark-Server-Token", self.token.expose_secret())
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl MailTransport for EmailClient {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        self.send_email(&email.to, &email.subject, &email.html_body, &email.text_body)
            .await?;
        Ok(())
    }
}
