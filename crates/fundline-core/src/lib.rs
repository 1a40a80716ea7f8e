//! Fundline Core: event logging, funding providers, and provider dispatch.
//!
//! This crate has no internal Fundline dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`events`]: Structured, level-filtered diagnostic logger
//! - [`funding`]: Provider contract, mock/skipped providers, registry
//! - [`address`]: Hex address validation
//! - [`state`]: Shared application state

#![doc = include_str!("../README.md")]

pub mod address;
pub mod error;
pub mod events;
pub mod funding;
pub mod state;

// Re-export key types at crate root for convenience
pub use address::{AddressReport, HexAddress};
pub use error::{Error, Result};
pub use state::AppState;
