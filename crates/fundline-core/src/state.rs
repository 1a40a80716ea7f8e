//! Application state management.
//!
//! Provides [`AppState`], the thread-safe bundle of process-wide services
//! that request handlers share: the event logger, the provider registry,
//! and the configured default provider.
//!
//! # Example
//!
//! ```
//! use fundline_core::events::{EventLogger, LogLevel, MemorySink};
//! use fundline_core::funding::FundingProviderName;
//! use fundline_core::AppState;
//!
//! let logger = EventLogger::new(LogLevel::Info, MemorySink::new());
//! let state = AppState::new(logger, FundingProviderName::Skipped);
//!
//! assert_eq!(state.default_provider_name(), FundingProviderName::Skipped);
//! ```

use std::sync::Arc;

use crate::events::EventLogger;
use crate::funding::{FundingProvider, FundingProviderName, FundingProviderRegistry};

/// Thread-safe shared application state.
///
/// Cloning is cheap (Arc clones). Every clone sees the same logger and
/// the same provider instances.
#[derive(Debug, Clone)]
pub struct AppState {
    logger: Arc<EventLogger>,
    providers: Arc<FundingProviderRegistry>,
    default_provider: FundingProviderName,
}

impl AppState {
    /// Create state with a fresh provider registry.
    pub fn new(logger: EventLogger, default_provider: FundingProviderName) -> Self {
        Self::from_parts(
            Arc::new(logger),
            Arc::new(FundingProviderRegistry::new()),
            default_provider,
        )
    }

    /// Create state from already-shared components.
    pub fn from_parts(
        logger: Arc<EventLogger>,
        providers: Arc<FundingProviderRegistry>,
        default_provider: FundingProviderName,
    ) -> Self {
        Self {
            logger,
            providers,
            default_provider,
        }
    }

    /// The event logger.
    pub fn logger(&self) -> &EventLogger {
        &self.logger
    }

    /// A cloneable handle to the event logger.
    pub fn logger_arc(&self) -> Arc<EventLogger> {
        Arc::clone(&self.logger)
    }

    /// The provider registry.
    pub fn providers(&self) -> &FundingProviderRegistry {
        &self.providers
    }

    /// Name of the provider used when a request does not pick one.
    pub fn default_provider_name(&self) -> FundingProviderName {
        self.default_provider
    }

    /// The provider used when a request does not pick one.
    pub fn default_provider(&self) -> Arc<dyn FundingProvider> {
        self.providers.get(self.default_provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{LogLevel, MemorySink};

    fn test_state() -> (AppState, MemorySink) {
        let sink = MemorySink::new();
        let logger = EventLogger::new(LogLevel::Debug, sink.clone());
        (AppState::new(logger, FundingProviderName::Mock), sink)
    }

    #[test]
    fn test_app_state_default_provider() {
        let (state, _) = test_state();
        assert_eq!(state.default_provider_name(), FundingProviderName::Mock);
        assert_eq!(state.default_provider().name(), FundingProviderName::Mock);
    }

    #[test]
    fn test_app_state_clone_shares_components() {
        let (state1, _) = test_state();
        let state2 = state1.clone();

        assert!(Arc::ptr_eq(&state1.logger_arc(), &state2.logger_arc()));
        assert!(Arc::ptr_eq(
            &state1.default_provider(),
            &state2.providers().get(FundingProviderName::Mock)
        ));
    }

    #[test]
    fn test_app_state_logger_writes_to_sink() {
        let (state, sink) = test_state();
        state.logger().info("server.ready");
        assert_eq!(sink.records()[0]["event"], "server.ready");
    }

    #[test]
    fn test_app_state_threshold_shared_between_clones() {
        let (state1, sink) = test_state();
        let state2 = state1.clone();

        state1.logger().set_minimum_level(LogLevel::Error);
        state2.logger().info("dropped");
        assert!(sink.is_empty());
    }

    #[test]
    fn test_app_state_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AppState>();
    }

    #[tokio::test]
    async fn test_app_state_across_tasks() {
        let (state, _) = test_state();
        let state_clone = state.clone();
        let handle = tokio::spawn(async move { state_clone.default_provider_name() });

        let result = handle.await;
        assert!(matches!(result, Ok(FundingProviderName::Mock)));
    }
}
