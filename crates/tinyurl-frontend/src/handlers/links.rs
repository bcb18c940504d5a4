use crate::backend::BackendError;
use crate::error::{FrontendError, Result};
use crate::handlers::CurrentUser;
use crate::state::FrontendState;
use crate::views;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::{Extension, Form};
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub struct CreateLinkForm {
    #[serde(rename = "URL", alias = "url")]
    url: String,
}

pub async fn index_handler(
    State(state): State<FrontendState>,
    Extension(CurrentUser(username)): Extension<CurrentUser>,
) -> Result<Html<String>> {
    let bindings = state.backend().bindings().await?;
    Ok(Html(views::index_page(&username, &bindings)))
}

/// Shortens the submitted URL and answers with the refreshed bindings table.
/// A rejection by the backend is shown as a notice above the table.
pub async fn create_link_handler(
    State(state): State<FrontendState>,
    Form(form): Form<CreateLinkForm>,
) -> Result<Html<String>> {
    let notice = match state.backend().create(&form.url).await {
        Ok(code) => {
            info!(code = %code, url = %form.url, "link created");
            None
        }
        Err(BackendError::Status { status, message }) => {
            warn!(status, url = %form.url, message = %message, "backend rejected link");
            Some(if message.is_empty() {
                format!("The link service answered with status {status}")
            } else {
                message
            })
        }
        Err(err) => return Err(err.into()),
    };

    let bindings = state.backend().bindings().await?;
    Ok(Html(views::bindings_fragment(&bindings, notice.as_deref())))
}

pub async fn redirect_handler(
    State(state): State<FrontendState>,
    Path(short_hash): Path<String>,
) -> Result<Response> {
    let Some(full_url) = state.backend().lookup(&short_hash).await? else {
        return Ok((
            StatusCode::NOT_FOUND,
            Html(views::message_page(
                "Not found",
                &format!("No link is registered under {short_hash}."),
            )),
        )
            .into_response());
    };

    let location = HeaderValue::try_from(full_url.as_str())
        .map_err(|_| FrontendError::InvalidLocation(full_url.clone()))?;

    Ok((StatusCode::PERMANENT_REDIRECT, [(header::LOCATION, location)]).into_response())
}

pub async fn favicon_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}
