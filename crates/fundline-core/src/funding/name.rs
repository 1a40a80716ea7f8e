//! The closed set of funding provider names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Identifier of a funding provider.
///
/// This enumeration is the single source of truth for which providers the
/// registry must serve. Adding a variant without wiring it into
/// [`FundingProviderRegistry::get`](super::FundingProviderRegistry::get)
/// fails to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundingProviderName {
    /// Test provider that records requests and reports them funded.
    Mock,
    /// No-op provider that declines every request.
    Skipped,
}

impl FundingProviderName {
    /// Every provider name.
    pub const ALL: [FundingProviderName; 2] = [Self::Mock, Self::Skipped];

    /// Wire name of the provider.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mock => "mock",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for FundingProviderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FundingProviderName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| Error::unsupported_provider(s))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_through_str() {
        for name in FundingProviderName::ALL {
            assert_eq!(name.as_str().parse::<FundingProviderName>().unwrap(), name);
            assert_eq!(name.to_string(), name.as_str());
        }
    }

    #[test]
    fn test_parse_is_exact() {
        assert!("Mock".parse::<FundingProviderName>().is_err());
        assert!(" mock".parse::<FundingProviderName>().is_err());
    }

    #[test]
    fn test_unknown_name_is_named_in_error() {
        let err = "stripe".parse::<FundingProviderName>().unwrap_err();
        assert!(matches!(err, Error::UnsupportedFundingProvider(ref v) if v == "stripe"));
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&FundingProviderName::Skipped).unwrap(),
            "\"skipped\""
        );
        assert!(serde_json::from_str::<FundingProviderName>("\"paypal\"").is_err());
    }
}
