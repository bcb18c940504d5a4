use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("invalid backend url: {0}")]
    InvalidBaseUrl(String),

    #[error("backend request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("backend responded with {status}: {message}")]
    Status { status: u16, message: String },
}

/// One `full_url -> short_code` pair as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub full_url: String,
    pub short_code: String,
}

#[derive(Serialize)]
struct CreateLinkRequest<'a> {
    #[serde(rename = "URL")]
    url: &'a str,
}

#[derive(Deserialize)]
struct CreateLinkResponse {
    short_postfix: String,
}

#[derive(Deserialize)]
struct GetUrlResponse {
    full_url: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// HTTP client for the JSON backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: Url,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self, BackendError> {
        let base_url =
            Url::parse(base_url).map_err(|e| BackendError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Fetches every binding, sorted by full URL.
    pub async fn bindings(&self) -> Result<Vec<Binding>, BackendError> {
        let response = self
            .client
            .get(self.endpoint(&["get_bindings"])?)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(status_error(response).await);
        }

        let raw: HashMap<String, String> = response.json().await?;
        let mut bindings: Vec<Binding> = raw
            .into_iter()
            .map(|(full_url, short_code)| Binding {
                full_url,
                short_code,
            })
            .collect();
        bindings.sort_by(|a, b| a.full_url.cmp(&b.full_url));

        debug!(count = bindings.len(), "fetched bindings");
        Ok(bindings)
    }

    /// Asks the backend to shorten `full_url` and returns the short code.
    pub async fn create(&self, full_url: &str) -> Result<String, BackendError> {
        let response = self
            .client
            .post(self.endpoint(&["create"])?)
            .json(&CreateLinkRequest { url: full_url })
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(status_error(response).await);
        }

        let created: CreateLinkResponse = response.json().await?;
        Ok(created.short_postfix)
    }

    /// Resolves a short code; `None` when the backend does not know it.
    pub async fn lookup(&self, short_hash: &str) -> Result<Option<String>, BackendError> {
        let response = self
            .client
            .get(self.endpoint(&["get_url", short_hash])?)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let found: GetUrlResponse = response.json().await?;
                Ok(Some(found.full_url))
            }
            StatusCode::BAD_REQUEST => Ok(None),
            _ => Err(status_error(response).await),
        }
    }
}

async fn status_error(response: reqwest::Response) -> BackendError {
    let status = response.status().as_u16();
    let message = match response.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(e) => {
            warn!(status, error = %e, "backend error without a readable body");
            String::new()
        }
    };
    BackendError::Status { status, message }
}
