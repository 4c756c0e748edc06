use actix_web::error::JsonPayloadError;
use actix_web::http::header::ALLOW;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use tracing::field::display;
use tracing::Span;

use crate::dispatcher::{DispatchError, DispatchOutcome, MailDispatcher};
use crate::domain::{Inquiry, InquiryForm};
use crate::utils::error_chain_fmt;

const BODY_LIMIT: usize = 1024 * 1024;

/// Body of every response on `/api/contact`.
#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq, Eq)]
pub struct ContactReply {
    pub msg: String,
}

impl ContactReply {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("All fields are required!")]
    ValidationError(String),
    #[error("Invalid request body")]
    MalformedBody(#[source] JsonPayloadError),
    #[error("Server error! Mail not sent.")]
    DispatchError(#[source] DispatchError),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ContactError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContactError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ContactError::MalformedBody(
                JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. },
            ) => StatusCode::PAYLOAD_TOO_LARGE,
            ContactError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ContactError::DispatchError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ContactReply::new(self.to_string()))
    }
}

/// JSON extractor settings for inquiries: 1 MiB cap, errors answered as `{"msg": ...}`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(BODY_LIMIT)
        .error_handler(|err, _req| ContactError::MalformedBody(err).into())
}

#[tracing::instrument(
    name = "Relaying a new inquiry",
    skip(body, dispatcher),
    fields(
        inquirer_name = tracing::field::Empty,
        inquirer_email = tracing::field::Empty,
    )
)]
pub async fn contact(
    body: web::Json<InquiryForm>,
    dispatcher: web::Data<MailDispatcher>,
) -> Result<HttpResponse, ContactError> {
    let inquiry: Inquiry = body
        .into_inner()
        .try_into()
        .map_err(ContactError::ValidationError)?;

    Span::current()
        .record("inquirer_name", &display(&inquiry.name))
        .record("inquirer_email", &display(&inquiry.email));

    match dispatcher.dispatch(&inquiry).await {
        DispatchOutcome::Sent => Ok(HttpResponse::Ok().json(ContactReply::new("Sent!"))),
        DispatchOutcome::Failed(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "Failed to relay the inquiry by email",
            );
            Err(ContactError::DispatchError(e))
        }
    }
}

pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .insert_header((ALLOW, "POST"))
        .json(ContactReply::new("Only POST allowed"))
}
