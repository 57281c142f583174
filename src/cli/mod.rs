//! CLI module for the MCP specialist server.

pub mod commands;
mod output;

pub use output::Output;

use crate::config::{ServerSettings, TransportKind};
use clap::{Args, Parser, Subcommand};

/// MCP Specialist - a minimal MCP tool server
///
/// Exposes health_check, echo_text and compute_sum over stdio or HTTP.
#[derive(Parser, Debug)]
#[command(name = "mcp-specialist")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(flatten)]
    pub server: ServerOverrides,

    /// Defaults to `run` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Transport settings that override the configuration file.
#[derive(Args, Debug, Default, Clone)]
pub struct ServerOverrides {
    /// Transport to use (stdio, http)
    #[arg(short, long, env = "MCP_TRANSPORT", global = true)]
    pub transport: Option<TransportKind>,

    /// Host the HTTP listener binds to
    #[arg(long, env = "MCP_HTTP_HOST", global = true)]
    pub host: Option<String>,

    /// Port the HTTP listener binds to
    #[arg(short, long, env = "MCP_HTTP_PORT", global = true)]
    pub port: Option<u16>,
}

impl ServerOverrides {
    pub fn apply(&self, server: &mut ServerSettings) {
        if let Some(transport) = self.transport {
            server.transport = transport;
        }
        if let Some(host) = &self.host {
            server.host = host.clone();
        }
        if let Some(port) = self.port {
            server.port = port;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the server on the configured transport
    Run,

    /// Start the server on stdin/stdout
    Stdio,

    /// Start the server on an HTTP endpoint
    Serve,

    /// List the available tools
    Tools,

    /// Invoke a tool once and print the response envelope
    Call {
        /// Tool name
        tool: String,

        /// Arguments as a JSON object
        #[arg(default_value = "{}")]
        arguments: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
