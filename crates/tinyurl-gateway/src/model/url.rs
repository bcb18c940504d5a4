use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    /// The front-end form posts this field as `URL`.
    #[serde(alias = "URL")]
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateLinkResponse {
    pub message: String,
    pub url: String,
    pub short_postfix: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetUrlResponse {
    pub full_url: String,
    pub short_postfix: String,
}
