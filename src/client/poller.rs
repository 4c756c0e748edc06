use std::time::Duration;

use backoff::ExponentialBackoffBuilder;

use super::api::{ClientError, ContactApi};
use super::status::{Severity, StatusBoard};

pub const READY_MESSAGE: &str = "Backend connected ✔ You can submit the form now.";
pub const WAKING_MESSAGE: &str = "Backend waking up... please wait 5–8 seconds ⏳";

/// Polls the health probe until the backend reports `OK`.
///
/// Hosted backends sleep when idle, so a failed probe is expected on page
/// load. Failures only update the status line; nothing is gated on this.
pub struct AvailabilityPoller {
    api: ContactApi,
    board: StatusBoard,
    interval: Duration,
    max_elapsed: Option<Duration>,
}

impl AvailabilityPoller {
    pub fn new(api: ContactApi, board: StatusBoard, interval: Duration) -> Self {
        Self {
            api,
            board,
            interval,
            max_elapsed: None,
        }
    }

    /// Stop polling, with the last error, once this much time has passed.
    pub fn give_up_after(mut self, max_elapsed: Duration) -> Self {
        self.max_elapsed = Some(max_elapsed);
        self
    }

    #[tracing::instrument(name = "Waiting for the backend", skip(self))]
    pub async fn wait_until_ready(&self) -> Result<(), ClientError> {
        // Fixed interval: no growth, no jitter.
        let schedule = ExponentialBackoffBuilder::new()
            .with_initial_interval(self.interval)
            .with_max_interval(self.interval)
            .with_multiplier(1.0)
            .with_randomization_factor(0.0)
            .with_max_elapsed_time(self.max_elapsed)
            .build();

        let api = &self.api;
        let operation = || async move { probe(api).await.map_err(backoff::Error::transient) };
        let notify = |e: ClientError, retry_in: Duration| {
            tracing::info!(error.message = %e, ?retry_in, "Backend is not ready yet");
            self.board.show(WAKING_MESSAGE, Severity::Info);
        };

        backoff::future::retry_notify(schedule, operation, notify).await?;

        tracing::info!("Backend is ready");
        self.board.show(READY_MESSAGE, Severity::Success);
        Ok(())
    }
}

async fn probe(api: &ContactApi) -> Result<(), ClientError> {
    let health = api.health().await?;
    if health.status == "OK" {
        Ok(())
    } else {
        Err(ClientError::NotReady(health.status))
    }
}
