//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};
use fundline_core::events::LogLevel;

// ============================================================================
// CLI argument types
// ============================================================================

/// Top-level CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "fundline", author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "FUNDLINE_CONFIG")]
    pub config: Option<String>,

    /// Minimum diagnostic event level (debug, info, warn, error).
    ///
    /// Overrides `log.level` from the configuration.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Enable verbose tracing output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential tracing output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<BaseCommand>,
}

/// Built-in commands.
#[derive(Subcommand, Debug)]
pub enum BaseCommand {
    /// Start the MCP server on stdio.
    Serve {
        /// Default funding provider for this run.
        #[arg(short, long)]
        provider: Option<String>,
    },

    /// List funding providers.
    Providers,

    /// Check that each argument is a 0x-prefixed hex address.
    ValidateAddress {
        /// Addresses to check.
        #[arg(required = true)]
        addresses: Vec<String>,
    },

    /// Print version information.
    Version,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Print the effective configuration as TOML.
    Show,

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================
