//! Stock code - a TWSE instrument code such as `2330`
//!
//! A valid code is an ASCII digit string of at least four characters.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

// ASCII digits only; `\d` would also accept full-width digits
static CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4,}$").expect("stock code pattern is valid"));

/// Validated instrument code
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StockCode(String);

impl StockCode {
    /// Parse and validate a code
    pub fn parse(s: &str) -> Result<Self, StockCodeError> {
        if Self::is_valid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(StockCodeError::InvalidFormat(s.to_string()))
        }
    }

    /// Check whether a string is a well-formed code without allocating
    #[inline]
    pub fn is_valid(s: &str) -> bool {
        CODE_PATTERN.is_match(s)
    }

    /// Borrow the code as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Error when parsing a StockCode from string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StockCodeError {
    #[error("invalid stock code: {0:?}")]
    InvalidFormat(String),
}

impl fmt::Display for StockCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for StockCode {
    type Err = StockCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for StockCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for StockCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for StockCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
