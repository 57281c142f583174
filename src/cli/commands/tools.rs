//! Tools command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::mcp::McpServer;
use anyhow::Result;

/// List the tools the server exposes.
pub fn run_tools(settings: Settings) -> Result<()> {
    let server = McpServer::new(settings);
    let tools = server.dispatcher().list_tools();

    Output::header(&format!("Available tools ({})", tools.len()));
    for tool in &tools {
        Output::tool(tool);
    }
    println!();

    Ok(())
}
