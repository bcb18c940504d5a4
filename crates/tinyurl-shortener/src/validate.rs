use tinyurl_core::ShortenerError;
use url::Url;

/// Checks that `url` is a syntactically valid absolute URL that can be
/// stored and redirected to exactly as given.
///
/// Any scheme is accepted. The input must:
/// - be non-empty, without surrounding whitespace or control characters
///   anywhere (the parser would silently drop them, so the stored string
///   would differ from the one that was checked)
/// - parse with [`Url::parse`]
/// - carry a host, or an opaque part such as `mailto:someone@example.com`
pub fn validate_url(url: &str) -> Result<(), ShortenerError> {
    if url.trim().is_empty() {
        return Err(ShortenerError::InvalidUrl("URL cannot be empty".to_string()));
    }
    if url.trim() != url {
        return Err(ShortenerError::InvalidUrl(format!(
            "{url:?}: surrounding whitespace"
        )));
    }
    if url.chars().any(char::is_control) {
        return Err(ShortenerError::InvalidUrl(format!(
            "{url:?}: control characters"
        )));
    }

    let parsed = Url::parse(url).map_err(|e| ShortenerError::InvalidUrl(format!("{url}: {e}")))?;

    let opaque = parsed.cannot_be_a_base() && !parsed.path().is_empty();
    if parsed.host().is_none() && !opaque {
        return Err(ShortenerError::InvalidUrl(format!("{url}: no host")));
    }

    Ok(())
}
