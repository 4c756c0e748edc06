use std::time::Duration;

use reqwest::StatusCode;

use crate::routes::{ContactReply, HealthStatus};
use crate::utils::error_chain_fmt;

use super::submission::ContactForm;

#[derive(thiserror::Error)]
pub enum ClientError {
    #[error("Could not reach the backend")]
    Unreachable(#[from] reqwest::Error),
    #[error("The backend answered but is not ready (status `{0}`)")]
    NotReady(String),
}

impl std::fmt::Debug for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Thin HTTP wrapper over the backend's `/api` routes.
#[derive(Clone)]
pub struct ContactApi {
    http_client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl ContactApi {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let status = self
            .http_client
            .get(format!("{}/api/health", self.base_url))
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .json::<HealthStatus>()
            .await?;
        Ok(status)
    }

    /// Posts the form. Any HTTP answer is `Ok`; the reply is `None` when the
    /// body is not a `{"msg": ...}` document.
    pub async fn submit(
        &self,
        form: &ContactForm,
    ) -> Result<(StatusCode, Option<ContactReply>), reqwest::Error> {
        let response = self
            .http_client
            .post(format!("{}/api/contact", self.base_url))
            .timeout(self.timeout)
            .json(form)
            .send()
            .await?;
        let status = response.status();
        let reply = response.json::<ContactReply>().await.ok();
        Ok((status, reply))
    }
}
