//! Transports carrying messages between a client and the dispatcher.

mod http;
mod stdio;

pub use http::{router, HostGuard, HttpTransport};
pub use stdio::StdioTransport;

use super::Dispatcher;
use crate::config::{ServerSettings, TransportKind};
use crate::error::Result;
use std::sync::Arc;

/// A channel the server can be reached on.
#[async_trait::async_trait]
pub trait Transport: Send {
    fn kind(&self) -> TransportKind;

    /// Human-readable address of the channel.
    fn describe(&self) -> String;

    /// Serve until the channel closes or shutdown is requested.
    async fn serve(self: Box<Self>, dispatcher: Arc<Dispatcher>) -> Result<()>;
}

/// Open the transport selected in `settings`.
///
/// For HTTP this binds the listener, so bind failures surface here.
pub async fn open(settings: &ServerSettings) -> Result<Box<dyn Transport>> {
    match settings.transport {
        TransportKind::Stdio => Ok(Box::new(StdioTransport::new())),
        TransportKind::Http => Ok(Box::new(HttpTransport::bind(settings.clone()).await?)),
    }
}
