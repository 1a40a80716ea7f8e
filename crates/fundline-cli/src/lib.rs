//! Command-line entry point for the Fundline MCP server.
//!
//! - [`cli`]: argument parsing
//! - [`config`]: configuration loading (`confyg`)
//! - [`app`]: command dispatch and server wiring

#![doc = include_str!("../README.md")]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;

pub use app::FundlineCli;
pub use cli::CliArgs;
pub use config::FundlineConfig;
