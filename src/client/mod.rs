//! Browser-side behaviour of the contact page: the availability poll that
//! runs on page load and the inquiry form submission, both reporting through
//! one transient status line.

mod api;
mod poller;
mod status;
mod submission;

pub use api::{ClientError, ContactApi};
pub use poller::{AvailabilityPoller, READY_MESSAGE, WAKING_MESSAGE};
pub use status::{Severity, StatusBoard, UiStatus};
pub use submission::{
    ContactForm, SubmissionController, SubmitButton, SubmitOutcome, SENDING_LABEL,
};

use std::time::Duration;

use crate::configuration::ClientSettings;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything the contact page needs, sharing a single status line.
pub struct ContactPage {
    pub status: StatusBoard,
    pub poller: AvailabilityPoller,
    pub submission: SubmissionController,
}

impl ContactPage {
    pub fn new(settings: &ClientSettings) -> Self {
        let api = ContactApi::new(settings.api_base_url.clone(), REQUEST_TIMEOUT);
        let status = StatusBoard::new(settings.status_display());

        Self {
            poller: AvailabilityPoller::new(api.clone(), status.clone(), settings.poll_interval()),
            submission: SubmissionController::new(
                api,
                status.clone(),
                settings.submit_label.clone(),
            ),
            status,
        }
    }
}
