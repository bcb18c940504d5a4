pub mod hashed;

pub use crate::hashed::{derive, Md5Deriver, DEFAULT_LENGTH};

use tinyurl_core::ShortCode;

/// Trait for deriving short codes from the URL being shortened.
///
/// Implementations are pure functions of their input: they don't interact
/// with storage, keep no counters and use no randomness, so the same URL
/// always yields the same code.
///
/// Distinct URLs may still map to the same code; detecting that is left
/// to the caller.
pub trait Deriver: Send + Sync + 'static {
    fn derive(&self, url: &str) -> ShortCode;
}
