//! Name-to-provider dispatch.
//!
//! [`FundingProviderRegistry`] is a total mapping from
//! [`FundingProviderName`] to one shared provider instance. Instances are
//! built once, when the registry is constructed, and never replaced.
//!
//! Typed callers use [`get`](FundingProviderRegistry::get), which cannot
//! fail. Untyped input (configuration values, tool arguments) goes through
//! [`resolve`](FundingProviderRegistry::resolve), which rejects names
//! outside the closed set with [`Error::UnsupportedFundingProvider`](crate::Error::UnsupportedFundingProvider).
//! That error is never mapped to a default provider.

use std::sync::Arc;

use super::mock::MockFundingProvider;
use super::name::FundingProviderName;
use super::provider::FundingProvider;
use super::skipped::SkippedFundingProvider;
use crate::Result;

/// One long-lived provider per [`FundingProviderName`].
#[derive(Clone)]
pub struct FundingProviderRegistry {
    mock: Arc<MockFundingProvider>,
    skipped: Arc<SkippedFundingProvider>,
}

impl FundingProviderRegistry {
    /// Builds every provider.
    pub fn new() -> Self {
        tracing::debug!(
            providers = FundingProviderName::ALL.len(),
            "funding provider registry initialised"
        );
        Self {
            mock: Arc::new(MockFundingProvider::new()),
            skipped: Arc::new(SkippedFundingProvider),
        }
    }

    /// The shared provider for `name`.
    ///
    /// Every call with the same name returns a pointer-equal `Arc`.
    pub fn get(&self, name: FundingProviderName) -> Arc<dyn FundingProvider> {
        // No wildcard arm: a new variant must be wired here to compile.
        match name {
            FundingProviderName::Mock => self.mock.clone(),
            FundingProviderName::Skipped => self.skipped.clone(),
        }
    }

    /// Looks up a provider by its wire name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFundingProvider`](crate::Error::UnsupportedFundingProvider) naming `raw` when it
    /// is not one of [`FundingProviderName::ALL`].
    pub fn resolve(&self, raw: &str) -> Result<Arc<dyn FundingProvider>> {
        match raw.parse::<FundingProviderName>() {
            Ok(name) => Ok(self.get(name)),
            Err(err) => {
                tracing::error!(provider = raw, "unsupported funding provider requested");
                Err(err)
            }
        }
    }

    /// Direct handle to the mock provider, for inspecting its history.
    pub fn mock(&self) -> Arc<MockFundingProvider> {
        Arc::clone(&self.mock)
    }

    /// Every registered name.
    pub fn names(&self) -> impl Iterator<Item = FundingProviderName> {
        FundingProviderName::ALL.into_iter()
    }
}

impl Default for FundingProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FundingProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FundingProviderRegistry")
            .field("providers", &FundingProviderName::ALL)
            .finish()
    }
}
