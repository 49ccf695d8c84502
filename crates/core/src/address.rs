//! Address - Chain account identifier
//!
//! Creators and participants are identified by EVM-style addresses:
//! `0x` followed by 40 hex digits. Comparison is case-insensitive, so the
//! address is normalized to lowercase on construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const PREFIX: &str = "0x";
const HEX_DIGITS: usize = 40;

/// Errors that can occur when parsing addresses
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Empty address")]
    Empty,

    #[error("Invalid address format: {0}")]
    InvalidFormat(String),
}

/// A normalized (lowercase) chain address.
///
/// # Examples
/// ```
/// use splitbill_core::Address;
///
/// let addr: Address = "0xAbC0000000000000000000000000000000000001".parse().unwrap();
/// assert_eq!(addr.as_str(), "0xabc0000000000000000000000000000000000001");
/// assert!(addr.matches("0xABC0000000000000000000000000000000000001"));
///
/// assert!("0x1234".parse::<Address>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Parse and normalize an address.
    pub fn parse(input: &str) -> Result<Self, AddressError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AddressError::Empty);
        }

        let normalized = trimmed.to_ascii_lowercase();
        let valid = normalized
            .strip_prefix(PREFIX)
            .is_some_and(|hex| hex.len() == HEX_DIGITS && hex.bytes().all(|b| b.is_ascii_hexdigit()));

        if valid {
            Ok(Self(normalized))
        } else {
            Err(AddressError::InvalidFormat(trimmed.to_string()))
        }
    }

    /// Returns the normalized address
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against a raw address string
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }

    /// Abbreviated form for display, e.g. `0x1234...abcd`
    pub fn short(&self) -> String {
        format!("{}...{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
