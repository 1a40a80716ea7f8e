//! FundlineCli application.
//!
//! Wires configuration, logging, the provider registry, and the MCP
//! server together, then dispatches CLI commands.

use crate::cli::{BaseCommand, CliArgs};
use crate::config::FundlineConfig;
use crate::config_handlers;
use fundline_core::events::{EventLogger, LogEntry, LogLevel};
use fundline_core::funding::FundingProviderRegistry;
use fundline_core::{AddressReport, AppState, Result};
use fundline_mcp::FundlineServer;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// ============================================================================
// FundlineCli
// ============================================================================

/// CLI application.
pub struct FundlineCli {
    name: String,
    config: FundlineConfig,
    version: String,
}

impl FundlineCli {
    /// Create from CLI args, loading config from file/env.
    pub fn from_args(name: impl Into<String>, args: &CliArgs) -> Result<Self> {
        let config = FundlineConfig::load(args.config.as_deref())?;
        Ok(Self::new(name, config))
    }

    /// Create a new CLI application.
    pub fn new(name: impl Into<String>, config: FundlineConfig) -> Self {
        Self {
            name: name.into(),
            config,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Get a reference to the loaded configuration.
    pub fn config(&self) -> &FundlineConfig {
        &self.config
    }

    /// Initialise tracing for library internals.
    ///
    /// Uses `RUST_LOG` if set, otherwise defaults based on verbosity flags.
    /// Output goes to stderr; stdout is reserved for the protocol.
    pub fn init_logging(&self, verbose: bool, quiet: bool) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else if quiet {
            EnvFilter::new("error")
        } else if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        };

        // Ignore error if a subscriber is already set (e.g. in tests).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Minimum event level: the `--log-level` flag, else `log.level`.
    pub fn resolve_log_level(&self, flag: Option<LogLevel>) -> Result<LogLevel> {
        match flag {
            Some(level) => Ok(level),
            None => self.config.log_level(),
        }
    }

    /// Build shared state with an event logger on stderr.
    ///
    /// `provider` overrides `funding.default_provider`. Either value must
    /// name a registered provider; an unknown name is an error and is never
    /// replaced by a fallback.
    pub fn build_state(&self, level: LogLevel, provider: Option<&str>) -> Result<AppState> {
        self.build_state_with(EventLogger::stderr(level), provider)
    }

    fn build_state_with(&self, logger: EventLogger, provider: Option<&str>) -> Result<AppState> {
        let registry = FundingProviderRegistry::new();
        let raw = provider.unwrap_or(&self.config.funding.default_provider);
        let default = registry.resolve(raw)?.name();
        Ok(AppState::from_parts(
            Arc::new(logger),
            Arc::new(registry),
            default,
        ))
    }

    /// Run the CLI with the given arguments.
    ///
    /// Failures that were already reported to the user come back as
    /// `Ok(ExitCode::FAILURE)`; everything else is an `Err`.
    pub async fn run(&self, args: CliArgs) -> Result<ExitCode> {
        self.init_logging(args.verbose, args.quiet);

        match args.command {
            Some(BaseCommand::Serve { provider }) => {
                let level = self.resolve_log_level(args.log_level)?;
                let state = self.build_state(level, provider.as_deref())?;
                state.logger().log(
                    LogEntry::debug("config.loaded")
                        .with_detail("log_level", level)
                        .with_detail("default_provider", state.default_provider_name()),
                );
                FundlineServer::new(state)
                    .with_name(&self.name)
                    .with_version(&self.version)
                    .serve_stdio()
                    .await?;
                Ok(ExitCode::SUCCESS)
            }
            Some(BaseCommand::Providers) => {
                let registry = FundingProviderRegistry::new();
                let default = registry.resolve(&self.config.funding.default_provider)?.name();
                for name in registry.names() {
                    let marker = if name == default { " (default)" } else { "" };
                    println!("{name}{marker}\t{}", registry.get(name).description());
                }
                Ok(ExitCode::SUCCESS)
            }
            Some(BaseCommand::ValidateAddress { addresses }) => {
                let report = AddressReport::check(addresses);
                for line in invalid_address_lines(&report) {
                    eprintln!("{line}");
                }
                if report.all_valid() {
                    Ok(ExitCode::SUCCESS)
                } else {
                    Ok(ExitCode::FAILURE)
                }
            }
            Some(BaseCommand::Version) => {
                println!("{} {}", self.name, self.version);
                Ok(ExitCode::SUCCESS)
            }
            Some(BaseCommand::Config(config_cmd)) => {
                config_handlers::handle_config_command(args.config.as_deref(), config_cmd.command)?;
                Ok(ExitCode::SUCCESS)
            }
            None => {
                println!("{} {} (use --help for usage)", self.name, self.version);
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

/// One stderr line per rejected address, in input order.
fn invalid_address_lines(report: &AddressReport) -> Vec<String> {
    report
        .invalid
        .iter()
        .map(|address| format!("invalid hex address: {address}"))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
