//! MCP server command implementation.

use crate::cli::Output;
use crate::config::{Settings, TransportKind};
use crate::mcp::McpServer;
use anyhow::{Context, Result};

/// Run the MCP server on the transport named in `settings`.
pub async fn run_mcp(settings: Settings) -> Result<()> {
    let server = McpServer::new(settings);
    let transport = server
        .open_transport()
        .await
        .context("Failed to start transport")?;

    // stdout belongs to the protocol on stdio.
    if transport.kind() == TransportKind::Http {
        Output::header("MCP Specialist Server");
        println!();
        Output::success(&format!("Listening on {}", transport.describe()));
        println!();
        println!("Tools:");
        for tool in server.dispatcher().list_tools() {
            Output::kv(&tool.name, &tool.description);
        }
        println!();
        Output::info("Press Ctrl+C to stop the server.");
    }

    server.serve(transport).await.context("Transport failed")?;
    Ok(())
}
