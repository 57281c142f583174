//! MCP server composition root.

use super::tools::default_registry;
use super::transport::{self, Transport};
use super::{Dispatcher, ToolRegistry};
use crate::config::Settings;
use crate::error::Result;
use std::sync::Arc;

/// Registry, dispatcher and settings, wired together once at startup.
pub struct McpServer {
    settings: Settings,
    dispatcher: Arc<Dispatcher>,
}

impl McpServer {
    /// Create a server exposing the built-in tools.
    pub fn new(settings: Settings) -> Self {
        Self::with_registry(settings, default_registry())
    }

    /// Create a server exposing `registry`.
    pub fn with_registry(settings: Settings, registry: ToolRegistry) -> Self {
        tracing::debug!(tools = registry.len(), "Tool registry built");
        let dispatcher = Arc::new(Dispatcher::new(registry, settings.tools.call_timeout()));
        Self {
            settings,
            dispatcher,
        }
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::clone(&self.dispatcher)
    }

    /// Open the configured transport.
    pub async fn open_transport(&self) -> Result<Box<dyn Transport>> {
        transport::open(&self.settings.server).await
    }

    /// Serve on `transport` until it shuts down.
    pub async fn serve(&self, transport: Box<dyn Transport>) -> Result<()> {
        tracing::info!(
            transport = %transport.kind(),
            tools = self.dispatcher.list_tools().len(),
            "MCP server starting"
        );
        transport.serve(self.dispatcher()).await
    }
}
