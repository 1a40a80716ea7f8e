//! Validated hex destination addresses.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

static HEX_ADDRESS: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^0x[0-9a-fA-F]+$").ok());

/// Returns `true` if `s` is `0x` followed by one or more hex digits.
pub fn is_hex_address(s: &str) -> bool {
    HEX_ADDRESS.as_ref().is_some_and(|re| re.is_match(s))
}

/// A `0x`-prefixed hexadecimal address.
///
/// The original casing is preserved.
///
/// ```
/// use fundline_core::HexAddress;
///
/// let addr = HexAddress::parse("0xAbC123").unwrap();
/// assert_eq!(addr.as_str(), "0xAbC123");
/// assert!(HexAddress::parse("abc123").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexAddress(String);

impl HexAddress {
    /// Validates and wraps `s`.
    pub fn parse(s: impl Into<String>) -> Result<Self> {
        let s = s.into();
        if is_hex_address(&s) {
            Ok(Self(s))
        } else {
            Err(Error::invalid_address(s))
        }
    }

    /// The address as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HexAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexAddress {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<HexAddress> for String {
    fn from(addr: HexAddress) -> Self {
        addr.0
    }
}

/// Partition of a batch of candidate addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressReport {
    /// Inputs that are valid hex addresses, in input order.
    pub valid: Vec<String>,
    /// Inputs that are not, in input order.
    pub invalid: Vec<String>,
}

impl AddressReport {
    /// Validates every input.
    pub fn check<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut report = Self::default();
        for input in inputs {
            let input = input.into();
            if is_hex_address(&input) {
                report.valid.push(input);
            } else {
                report.invalid.push(input);
            }
        }
        report
    }

    /// Whether every input was valid.
    pub fn all_valid(&self) -> bool {
        self.invalid.is_empty()
    }
}
