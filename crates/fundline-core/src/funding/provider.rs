//! Funding provider abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::name::FundingProviderName;
use crate::{Error, HexAddress, Result};

/// Capability surface shared by every funding provider.
///
/// Implementations are long-lived and shared: the registry hands out one
/// `Arc` per provider name for the life of the process, so any internal
/// state must be synchronised by the implementation itself.
#[async_trait]
pub trait FundingProvider: Send + Sync {
    /// The name this provider is registered under.
    fn name(&self) -> FundingProviderName;

    /// Human-readable one-line description.
    fn description(&self) -> &str;

    /// Attempts to fund `request.address` with `request.amount`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the request fails validation.
    async fn fund(&self, request: FundingRequest) -> Result<FundingOutcome>;
}

/// A request to move funds to an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingRequest {
    /// Destination address
    pub address: HexAddress,

    /// Amount in base units
    pub amount: u64,

    /// Free-form note carried with the request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl FundingRequest {
    /// Creates a request without a memo.
    pub fn new(address: HexAddress, amount: u64) -> Self {
        Self {
            address,
            amount,
            memo: None,
        }
    }

    /// Sets the memo.
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// Checks invariants not expressed by the field types.
    pub fn validate(&self) -> Result<()> {
        if self.amount == 0 {
            return Err(Error::invalid_request("amount must be greater than zero"));
        }
        Ok(())
    }
}

/// Result of a funding attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
#[non_exhaustive]
pub enum FundingOutcome {
    /// Funds were sent.
    Funded {
        /// Provider that handled the request
        provider: FundingProviderName,
        /// Provider-assigned reference for the transfer
        reference: String,
        /// Destination address
        address: HexAddress,
        /// Amount in base units
        amount: u64,
    },

    /// The provider declined to act.
    Skipped {
        /// Provider that handled the request
        provider: FundingProviderName,
        /// Why nothing was sent
        reason: String,
    },
}

impl FundingOutcome {
    /// Provider that produced this outcome.
    pub fn provider(&self) -> FundingProviderName {
        match self {
            Self::Funded { provider, .. } | Self::Skipped { provider, .. } => *provider,
        }
    }

    /// Whether funds were sent.
    pub fn is_funded(&self) -> bool {
        matches!(self, Self::Funded { .. })
    }
}
