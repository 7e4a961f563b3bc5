use actix_web::{
    error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse, ResponseError,
};
use thiserror::Error;

use crate::models::payment_input::ValidationError;
use crate::services::payment::interface::PaymentError;

/// Errors surfaced by the HTTP handlers.
///
/// Payment service and rendering failures reach the caller without detail.
/// The cause is logged at `error` level.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request processing failed")]
    ProcessingFailure(#[from] PaymentError),
    #[error("failed to render page")]
    Render(#[from] tera::Error),
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    InvalidBody(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::ProcessingFailure(_) | ApiError::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({ "error": self.to_string() }))
    }
}

fn describe_json_error(err: &JsonPayloadError) -> &'static str {
    match err {
        JsonPayloadError::ContentType => "request body must be application/json",
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "request body is too large"
        }
        JsonPayloadError::Deserialize(e) if e.is_syntax() || e.is_eof() => {
            "request body is not valid JSON"
        }
        JsonPayloadError::Deserialize(_) => "request body has missing or invalid payment fields",
        _ => "request body could not be read",
    }
}

/// Maps JSON extractor failures onto the `{"error": …}` body of the API.
///
/// The serde message stays in the log only.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("Rejected JSON body for {}: {}", req.path(), err);
    ApiError::InvalidBody(describe_json_error(&err).to_string()).into()
}
