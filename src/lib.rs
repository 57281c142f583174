//! MCP Specialist - a minimal Model Context Protocol tool server
//!
//! Exposes a fixed set of schema-described tools (`health_check`,
//! `echo_text`, `compute_sum`) to MCP clients over either newline-delimited
//! JSON-RPC on stdio or a single HTTP endpoint.
//!
//! # Architecture
//!
//! - `mcp::tools` - the built-in tools and their typed input/output contracts
//! - `mcp` registry - immutable name to handler mapping, built once
//! - `mcp::Dispatcher` - decodes messages, validates, runs tools, encodes replies
//! - `mcp::transport` - stdio and HTTP adapters sharing the same dispatcher
//! - `config` - TOML settings with CLI and environment overrides
//! - `cli` - command-line interface
//!
//! # Example
//!
//! ```rust,no_run
//! use mcp_specialist::config::Settings;
//! use mcp_specialist::mcp::{McpServer, RequestEnvelope};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let server = McpServer::new(Settings::default());
//!
//!     let envelope = server
//!         .dispatcher()
//!         .call_tool(RequestEnvelope::new("compute_sum", json!({ "a": 2, "b": 3 })))
//!         .await;
//!     println!("{:?}", envelope.first_text());
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod mcp;

pub use error::{Result, ServerError, ToolError};
