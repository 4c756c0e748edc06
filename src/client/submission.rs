use tokio::sync::watch;

use super::api::ContactApi;
use super::status::{Severity, StatusBoard};

pub const SENDING_LABEL: &str = "Sending...";

const SENT_REPLY: &str = "Sent!";
const FILL_REQUIRED: &str = "Please fill all required fields!";
const SENDING: &str = "Sending your message...";
const THANK_YOU: &str = "Thank you! We’ll contact you on WhatsApp soon.";
const SEND_FAILED: &str = "Failed to send. Please try again.";
const NETWORK_ERROR: &str = "Network error — backend is waking up. Try again in 5 seconds.";

/// What the visitor typed into the inquiry form.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub message: String,
}

impl ContactForm {
    fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            whatsapp: self.whatsapp.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }

    fn is_missing_required(&self) -> bool {
        self.name.is_empty() || self.email.is_empty() || self.whatsapp.is_empty()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub disabled: bool,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The backend relayed the inquiry; the form was cleared.
    Sent,
    /// A required field was blank; nothing was sent.
    Rejected,
    /// Another submission is still in flight.
    Busy,
    /// The backend answered with anything but `Sent!`.
    Failed,
    /// The request never got an answer.
    NetworkError,
}

pub struct SubmissionController {
    api: ContactApi,
    board: StatusBoard,
    button: watch::Sender<SubmitButton>,
    idle_label: String,
}

/// Restores the submit button when the request ends, however it ends.
struct InFlight<'a> {
    button: &'a watch::Sender<SubmitButton>,
    idle_label: &'a str,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.button.send_replace(SubmitButton {
            disabled: false,
            label: self.idle_label.to_string(),
        });
    }
}

impl SubmissionController {
    pub fn new(api: ContactApi, board: StatusBoard, idle_label: String) -> Self {
        let (button, _) = watch::channel(SubmitButton {
            disabled: false,
            label: idle_label.clone(),
        });
        Self {
            api,
            board,
            button,
            idle_label,
        }
    }

    pub fn button(&self) -> SubmitButton {
        self.button.borrow().clone()
    }

    pub fn watch_button(&self) -> watch::Receiver<SubmitButton> {
        self.button.subscribe()
    }

    #[tracing::instrument(name = "Submitting the inquiry form", skip_all)]
    pub async fn submit(&self, form: &mut ContactForm) -> SubmitOutcome {
        let payload = form.trimmed();
        if payload.is_missing_required() {
            self.board.show(FILL_REQUIRED, Severity::Error);
            return SubmitOutcome::Rejected;
        }

        let _in_flight = match self.begin() {
            Some(guard) => guard,
            None => return SubmitOutcome::Busy,
        };
        self.board.show(SENDING, Severity::Info);

        match self.api.submit(&payload).await {
            Ok((status, Some(reply))) if status.is_success() && reply.msg == SENT_REPLY => {
                self.board.show(THANK_YOU, Severity::Success);
                form.reset();
                SubmitOutcome::Sent
            }
            Ok((status, reply)) => {
                tracing::warn!(%status, ?reply, "The backend refused the inquiry");
                let message = reply
                    .map(|r| r.msg)
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| SEND_FAILED.to_string());
                self.board.show(message, Severity::Error);
                SubmitOutcome::Failed
            }
            Err(e) => {
                tracing::warn!(error.message = %e, "Could not reach the backend");
                self.board.show(NETWORK_ERROR, Severity::Error);
                SubmitOutcome::NetworkError
            }
        }
    }

    fn begin(&self) -> Option<InFlight<'_>> {
        let acquired = self.button.send_if_modified(|button| {
            if button.disabled {
                false
            } else {
                button.disabled = true;
                button.label = SENDING_LABEL.to_string();
                true
            }
        });

        acquired.then(|| InFlight {
            button: &self.button,
            idle_label: &self.idle_label,
        })
    }
}
