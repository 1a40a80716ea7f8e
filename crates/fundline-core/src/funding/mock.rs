//! Mock funding provider for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::name::FundingProviderName;
use super::provider::{FundingOutcome, FundingProvider, FundingRequest};
use crate::Result;

/// Mock provider that reports every valid request as funded.
///
/// Useful for exercising the funding path without moving real funds.
/// Clones share the same history.
#[derive(Clone, Default)]
pub struct MockFundingProvider {
    history: Arc<Mutex<Vec<FundingRequest>>>,
}

impl MockFundingProvider {
    /// Creates a mock provider with an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests funded so far, oldest first.
    pub async fn history(&self) -> Vec<FundingRequest> {
        self.history.lock().await.clone()
    }
}

#[async_trait]
impl FundingProvider for MockFundingProvider {
    fn name(&self) -> FundingProviderName {
        FundingProviderName::Mock
    }

    fn description(&self) -> &str {
        "Records requests in memory and reports them funded"
    }

    async fn fund(&self, request: FundingRequest) -> Result<FundingOutcome> {
        request.validate()?;

        let mut history = self.history.lock().await;
        history.push(request.clone());
        let reference = format!("mock-{:06}", history.len());

        tracing::debug!(%reference, address = %request.address, "mock funding recorded");

        Ok(FundingOutcome::Funded {
            provider: FundingProviderName::Mock,
            reference,
            address: request.address,
            amount: request.amount,
        })
    }
}
