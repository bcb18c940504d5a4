use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Path segment under which a full URL is stored, e.g. `c984d06a`.
///
/// Derived codes and codes read back from storage are wrapped with
/// [`ShortCode::new_unchecked`]. Anything arriving from a client goes through
/// [`ShortCode::new`] (or `parse`), which admits 3 to 32 characters of
/// `[a-zA-Z0-9_-]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortCode(String);

const ALLOWED_LEN: std::ops::RangeInclusive<usize> = 3..=32;

fn is_code_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl ShortCode {
    pub fn new(code: impl Into<String>) -> Result<Self, CoreError> {
        let code = code.into();

        if !ALLOWED_LEN.contains(&code.len()) {
            return Err(CoreError::InvalidShortCode(format!(
                "'{code}' has {} characters, expected {}..={}",
                code.len(),
                ALLOWED_LEN.start(),
                ALLOWED_LEN.end()
            )));
        }
        if let Some(bad) = code.chars().find(|c| !is_code_char(*c)) {
            return Err(CoreError::InvalidShortCode(format!(
                "'{code}' contains '{bad}', only [a-zA-Z0-9_-] is allowed"
            )));
        }

        Ok(Self(code))
    }

    /// Wraps a code from a trusted source as is.
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for ShortCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Display for ShortCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShortCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
