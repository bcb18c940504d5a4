use crate::error::{AppError, Result};
use crate::model::{CreateLinkRequest, CreateLinkResponse, GetUrlResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::collections::BTreeMap;
use tinyurl_core::{ShortCode, ShortenerError, StorageError};
use tracing::{debug, info};

const CREATED_MESSAGE: &str = "URL received successfully";

pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<Json<CreateLinkResponse>> {
    let Json(request) = payload.map_err(|e| AppError::InvalidPayload(e.body_text()))?;

    let shortened = state
        .shortener()
        .shorten(&request.url)
        .await
        .map_err(AppError::Create)?;

    info!(
        code = %shortened.code,
        url = %request.url,
        created = shortened.created,
        "shorten request served"
    );

    Ok(Json(CreateLinkResponse {
        message: CREATED_MESSAGE.to_string(),
        url: request.url,
        short_postfix: shortened.code.into_inner(),
    }))
}

pub async fn redirect_handler(
    Path(short_hash): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    let full_url = resolve(&state, &short_hash).await?;
    let location = HeaderValue::try_from(full_url.as_str()).map_err(|e| {
        AppError::Lookup(ShortenerError::Storage(StorageError::InvalidData(format!(
            "stored url is not a valid Location header: {e}"
        ))))
    })?;

    Ok((StatusCode::PERMANENT_REDIRECT, [(header::LOCATION, location)]).into_response())
}

pub async fn get_url_handler(
    Path(short_hash): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<GetUrlResponse>> {
    let full_url = resolve(&state, &short_hash).await?;
    Ok(Json(GetUrlResponse {
        full_url,
        short_postfix: short_hash,
    }))
}

pub async fn bindings_handler(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, String>>> {
    let mappings = state.shortener().list().await.map_err(AppError::Bindings)?;
    debug!(count = mappings.len(), "listing bindings");

    Ok(Json(
        mappings
            .into_iter()
            .map(|m| (m.full_url, m.short_code.into_inner()))
            .collect(),
    ))
}

async fn resolve(state: &AppState, short_hash: &str) -> Result<String> {
    let code: ShortCode = short_hash
        .parse()
        .map_err(|e| AppError::Lookup(ShortenerError::from(e)))?;
    state
        .shortener()
        .resolve(&code)
        .await
        .map_err(AppError::Lookup)
}
