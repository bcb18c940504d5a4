use crate::Deriver;
use md5::{Digest, Md5};
use tinyurl_core::ShortCode;
use typed_builder::TypedBuilder;

/// Number of hex characters kept from the digest by default.
pub const DEFAULT_LENGTH: usize = 8;

/// Width of an MD5 digest rendered as hex.
const DIGEST_HEX_LEN: usize = 32;

/// Derives short codes by truncating the hex MD5 digest of the URL.
///
/// MD5 keeps codes compatible with databases written by earlier versions
/// of the service. With the default length of 8 hex characters the code
/// space is 32 bits, so unrelated URLs can and eventually will collide.
#[derive(Debug, Clone, TypedBuilder)]
pub struct Md5Deriver {
    #[builder(default = DEFAULT_LENGTH)]
    length: usize,
}

impl Md5Deriver {
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for Md5Deriver {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Deriver for Md5Deriver {
    fn derive(&self, url: &str) -> ShortCode {
        ShortCode::new_unchecked(derive(url, self.length))
    }
}

/// Returns the first `length` lowercase hex characters of `md5(url)`.
///
/// `length` is capped at the digest width (32).
pub fn derive(url: &str, length: usize) -> String {
    let digest = Md5::digest(url.as_bytes());
    let mut hex = format!("{:x}", digest);
    hex.truncate(length.min(DIGEST_HEX_LEN));
    hex
}
