use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tinyurl_core::ShortenerError;
use tracing::{error, warn};

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

/// A failed request, tagged with the operation that failed.
///
/// The operation decides the status code and the message clients see;
/// the underlying error is only logged.
#[derive(Debug)]
pub enum AppError {
    /// The create request body could not be decoded.
    InvalidPayload(String),
    Create(ShortenerError),
    Lookup(ShortenerError),
    Bindings(ShortenerError),
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidPayload(_) | AppError::Create(ShortenerError::InvalidUrl(_)) => {
                (StatusCode::BAD_REQUEST, "Failed to parse URL")
            }
            AppError::Create(_) => (StatusCode::NOT_FOUND, "Failed to load URL from DB"),
            AppError::Lookup(_) => (StatusCode::BAD_REQUEST, "Failed to find URL"),
            AppError::Bindings(_) => (StatusCode::NOT_FOUND, "Failed to query bindings"),
        }
    }

    fn log(&self) {
        match self {
            AppError::InvalidPayload(reason) => warn!(%reason, "rejected create payload"),
            AppError::Create(ShortenerError::InvalidUrl(reason)) => {
                warn!(%reason, "rejected invalid url")
            }
            AppError::Create(err) => error!(error = %err, "failed to create short link"),
            AppError::Lookup(ShortenerError::NotFound(code)) => {
                warn!(%code, "short code not found")
            }
            AppError::Lookup(ShortenerError::InvalidShortCode(reason)) => {
                warn!(%reason, "malformed short code")
            }
            AppError::Lookup(err) => error!(error = %err, "failed to resolve short code"),
            AppError::Bindings(err) => error!(error = %err, "failed to list bindings"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let (status, message) = self.status_and_message();
        (
            status,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}
