//! Funding provider abstractions, implementations, and dispatch.

mod mock;
mod name;
mod provider;
mod registry;
mod skipped;

pub use mock::MockFundingProvider;
pub use name::FundingProviderName;
pub use provider::{FundingOutcome, FundingProvider, FundingRequest};
pub use registry::FundingProviderRegistry;
pub use skipped::{SKIPPED_REASON, SkippedFundingProvider};
