use std::sync::Arc;

use chrono::{DateTime, Utc};
use tera::{Context, Tera};

use crate::domain::{EmailAddress, Inquiry};
use crate::mail_transport::{MailError, MailTransport, OutgoingEmail};
use crate::utils::error_chain_fmt;

const ADMIN_NOTICE: &str = "admin_notice";
const ACKNOWLEDGMENT: &str = "acknowledgment";

#[derive(Debug)]
pub enum DispatchOutcome {
    /// Both the admin notice and the acknowledgment were accepted.
    Sent,
    Failed(DispatchError),
}

#[derive(thiserror::Error)]
pub enum DispatchError {
    #[error("Failed to render the {0} template")]
    Template(&'static str, #[source] tera::Error),
    #[error("Failed to send the admin notice")]
    AdminNotice(#[source] MailError),
    #[error("Failed to send the acknowledgment to the submitter")]
    Acknowledgment(#[source] MailError),
}

impl std::fmt::Debug for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Loads every template below `dir`, named by their path relative to it.
pub fn load_templates(dir: &str) -> Result<Tera, tera::Error> {
    Tera::new(&format!("{}/**/*", dir.trim_end_matches('/')))
}

#[derive(serde::Serialize)]
struct TemplateContext<'a> {
    brand_name: &'a str,
    name: &'a str,
    email: &'a str,
    whatsapp: &'a str,
    message: &'a str,
    received_at: String,
}

/// Turns one inquiry into an admin notice and an acknowledgment, sent in that
/// order through the configured transport.
pub struct MailDispatcher {
    transport: Arc<dyn MailTransport>,
    templates: Tera,
    admin: EmailAddress,
    brand_name: String,
}

impl MailDispatcher {
    pub fn new(
        transport: Arc<dyn MailTransport>,
        templates: Tera,
        admin: EmailAddress,
        brand_name: String,
    ) -> Self {
        Self {
            transport,
            templates,
            admin,
            brand_name,
        }
    }

    #[tracing::instrument(
        name = "Dispatching inquiry emails",
        skip_all,
        fields(inquirer_email = %inquiry.email)
    )]
    pub async fn dispatch(&self, inquiry: &Inquiry) -> DispatchOutcome {
        match self.try_dispatch(inquiry, Utc::now()).await {
            Ok(()) => DispatchOutcome::Sent,
            Err(e) => DispatchOutcome::Failed(e),
        }
    }

    async fn try_dispatch(
        &self,
        inquiry: &Inquiry,
        received_at: DateTime<Utc>,
    ) -> Result<(), DispatchError> {
        let (admin_notice, acknowledgment) = self.compose(inquiry, received_at)?;

        self.transport
            .send(&admin_notice)
            .await
            .map_err(DispatchError::AdminNotice)?;
        self.transport
            .send(&acknowledgment)
            .await
            .map_err(DispatchError::Acknowledgment)?;

        Ok(())
    }

    fn compose(
        &self,
        inquiry: &Inquiry,
        received_at: DateTime<Utc>,
    ) -> Result<(OutgoingEmail, OutgoingEmail), DispatchError> {
        let context = Context::from_serialize(TemplateContext {
            brand_name: &self.brand_name,
            name: inquiry.name.as_ref(),
            email: inquiry.email.as_ref(),
            whatsapp: inquiry.whatsapp.as_ref(),
            message: inquiry.message_or_placeholder(),
            received_at: received_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        })
        .map_err(|e| DispatchError::Template("context", e))?;

        let admin_notice = OutgoingEmail {
            to: self.admin.as_ref().to_string(),
            subject: format!("📩 New Inquiry from {}", inquiry.name),
            html_body: self.render(ADMIN_NOTICE, "html", &context)?,
            text_body: self.render(ADMIN_NOTICE, "txt", &context)?,
        };
        let acknowledgment = OutgoingEmail {
            to: inquiry.email.as_ref().to_string(),
            subject: format!("Thanks for contacting {} 🎓", self.brand_name),
            html_body: self.render(ACKNOWLEDGMENT, "html", &context)?,
            text_body: self.render(ACKNOWLEDGMENT, "txt", &context)?,
        };

        Ok((admin_notice, acknowledgment))
    }

    fn render(
        &self,
        template: &'static str,
        extension: &str,
        context: &Context,
    ) -> Result<String, DispatchError> {
        self.templates
            .render(&format!("{template}.{extension}"), context)
            .map_err(|e| DispatchError::Template(template, e))
    }
}
