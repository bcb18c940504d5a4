//! Core types and traits for the tinyurl shortener.
//!
//! This crate holds what the deriver, the storage backends, the link
//! service and the HTTP surfaces all agree on.

pub mod error;
pub mod repository;
pub mod shortcode;
pub mod shortener;

pub use error::{CoreError, ShortenerError, StorageError};
pub use repository::{Mapping, ReadRepository, Repository};
pub use shortcode::ShortCode;
pub use shortener::{Shortened, Shortener};
