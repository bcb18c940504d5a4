use crate::error::ShortenerError;
use crate::repository::Mapping;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, ShortenerError>;

/// Outcome of a [`Shortener::shorten`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortened {
    pub code: ShortCode,
    /// `false` when the URL had already been shortened before.
    pub created: bool,
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Shortens `full_url`, reusing the existing code if it was shortened before.
    async fn shorten(&self, full_url: &str) -> Result<Shortened>;

    /// Resolves a short code to the full URL it was created for.
    async fn resolve(&self, code: &ShortCode) -> Result<String>;

    /// Lists all bindings ordered by full URL.
    async fn list(&self) -> Result<Vec<Mapping>>;
}
