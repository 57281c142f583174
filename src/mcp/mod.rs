//! MCP (Model Context Protocol) server core.
//!
//! A read-only tool registry, a dispatcher that turns JSON-RPC messages and
//! bare tool envelopes into responses, and the stdio and HTTP transports that
//! carry them.

mod dispatcher;
pub mod protocol;
mod registry;
mod server;
pub mod tools;
pub mod transport;

pub use dispatcher::{Dispatcher, PROTOCOL_VERSION, SERVER_NAME, SERVER_VERSION};
pub use protocol::{RequestEnvelope, ResponseEnvelope, ToolContent, ToolDescriptor};
pub use registry::{Arguments, FromArguments, Tool, ToolHandler, ToolRegistry, ToolRegistryBuilder};
pub use server::McpServer;
pub use transport::Transport;
