use crate::backend::BackendError;
use crate::views;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::error;

pub type Result<T, E = FrontendError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("backend returned an unusable redirect target: {0}")]
    InvalidLocation(String),
}

impl IntoResponse for FrontendError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        (
            StatusCode::BAD_GATEWAY,
            Html(views::message_page(
                "Backend unavailable",
                "The link service could not be reached. Try again later.",
            )),
        )
            .into_response()
    }
}
