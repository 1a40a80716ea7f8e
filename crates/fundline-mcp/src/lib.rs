//! MCP server infrastructure for Fundline.
//!
//! # Key Abstractions
//!
//! - `ToolRegistry` trait: groups of tools that dispatch by name
//! - `FundingTools`: funding operations backed by the provider registry
//! - `FundlineServer`: `rmcp` server handler over stdio

#![doc = include_str!("../README.md")]

pub mod error;
pub mod registry;
pub mod server;
pub mod tools;

pub use error::McpErrorExt;
pub use registry::{CompositeRegistry, ToolRegistry, ToolResult};
pub use server::FundlineServer;
pub use tools::FundingTools;
