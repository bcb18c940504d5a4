//! Link service for the tinyurl shortener.
//!
//! [`ShortenerService`] ties a [`Deriver`](tinyurl_generator::Deriver) to a
//! [`Repository`](tinyurl_core::Repository): it validates incoming URLs,
//! de-duplicates them on create and resolves codes on redirect.

pub mod service;
pub mod validate;

pub use service::ShortenerService;
pub use tinyurl_core::{Shortened, Shortener, ShortenerError};
pub use validate::validate_url;
