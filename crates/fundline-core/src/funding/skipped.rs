//! No-op funding provider.

use async_trait::async_trait;

use super::name::FundingProviderName;
use super::provider::{FundingOutcome, FundingProvider, FundingRequest};
use crate::Result;

/// Reason reported for every request.
pub const SKIPPED_REASON: &str = "funding disabled";

/// Provider that validates requests and never sends funds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkippedFundingProvider;

#[async_trait]
impl FundingProvider for SkippedFundingProvider {
    fn name(&self) -> FundingProviderName {
        FundingProviderName::Skipped
    }

    fn description(&self) -> &str {
        "Declines every request without side effects"
    }

    async fn fund(&self, request: FundingRequest) -> Result<FundingOutcome> {
        request.validate()?;
        Ok(FundingOutcome::Skipped {
            provider: FundingProviderName::Skipped,
            reason: SKIPPED_REASON.to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::HexAddress;

    #[tokio::test]
    async fn test_skipped_declines() {
        let request = FundingRequest::new(HexAddress::parse("0xff").unwrap(), 3);
        let outcome = SkippedFundingProvider.fund(request).await.unwrap();
        assert_eq!(
            outcome,
            FundingOutcome::Skipped {
                provider: FundingProviderName::Skipped,
                reason: SKIPPED_REASON.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_skipped_still_validates() {
        let request = FundingRequest::new(HexAddress::parse("0xff").unwrap(), 0);
        assert!(SkippedFundingProvider.fund(request).await.is_err());
    }
}
