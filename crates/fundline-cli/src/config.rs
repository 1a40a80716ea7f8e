//! Configuration for the Fundline CLI.
//!
//! Provides the [`FundlineConfig`] struct that loads from TOML files,
//! environment variables, and defaults using the `confyg` crate.
//!
//! # Loading Priority
//!
//! 1. Explicit `--config <path>` flag
//! 2. `FUNDLINE_CONFIG` environment variable
//! 3. XDG default: `~/.config/fundline/config.toml`
//! 4. Built-in defaults
//!
//! `FUNDLINE_<SECTION>_<KEY>` variables (e.g. `FUNDLINE_LOG_LEVEL`) are
//! overlaid on top of the file.

use confyg::{Confygery, env};
use fundline_core::events::LogLevel;
use fundline_core::funding::FundingProviderName;
use fundline_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Configuration structs
// ============================================================================

/// Main configuration for Fundline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FundlineConfig {
    /// Diagnostic logging configuration.
    pub log: LogConfig,

    /// Funding provider configuration.
    pub funding: FundingConfig,
}

/// Diagnostic logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Minimum event level: `debug`, `info`, `warn`, or `error`.
    pub level: String,
}

/// Funding provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FundingConfig {
    /// Provider used when a request does not name one.
    pub default_provider: String,
}

// ============================================================================
// Default implementations
// ============================================================================

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info.to_string(),
        }
    }
}

impl Default for FundingConfig {
    fn default() -> Self {
        Self {
            default_provider: FundingProviderName::Skipped.to_string(),
        }
    }
}

// ============================================================================
// Config loading
// ============================================================================

impl FundlineConfig {
    /// Load configuration from file, environment, and defaults.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder =
            Confygery::new().map_err(|e| Error::config(format!("config init: {e}")))?;

        if let Some(path) = Self::resolve_config_path(config_path) {
            if path.exists() {
                builder
                    .add_file(&path.to_string_lossy())
                    .map_err(|e| Error::config(format!("config file: {e}")))?;
            }
        }

        let mut env_opts = env::Options::with_top_level("FUNDLINE");
        env_opts.add_section("log");
        env_opts.add_section("funding");
        builder
            .add_env(env_opts)
            .map_err(|e| Error::config(format!("config env: {e}")))?;

        let config: Self = builder
            .build()
            .map_err(|e| Error::config(format!("config build: {e}")))?;

        Ok(config)
    }

    /// Resolve the config file path from explicit flag, env var, or XDG default.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }

        if let Ok(path) = std::env::var("FUNDLINE_CONFIG") {
            return Some(PathBuf::from(path));
        }

        Self::default_config_path()
    }

    /// Return the XDG default config path.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("fundline").join("config.toml"))
    }

    /// Serialize this config to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// The configured minimum log level.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLogLevel`] if `log.level` is not a known level.
    pub fn log_level(&self) -> Result<LogLevel> {
        self.log.level.parse()
    }
}

// ============================================================================
// Tests
// ============================================================================
