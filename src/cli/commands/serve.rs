//! Transport-forcing server commands.

use super::run_mcp;
use crate::config::{Settings, TransportKind};
use anyhow::Result;

/// Run the MCP server on an HTTP endpoint regardless of configuration.
pub async fn run_serve(mut settings: Settings) -> Result<()> {
    settings.server.transport = TransportKind::Http;
    run_mcp(settings).await
}

/// Run the MCP server on stdin/stdout regardless of configuration.
pub async fn run_stdio(mut settings: Settings) -> Result<()> {
    settings.server.transport = TransportKind::Stdio;
    run_mcp(settings).await
}
