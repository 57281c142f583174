//! Configuration module.
//!
//! Settings are loaded from a TOML file and overridden by CLI flags or the
//! `MCP_TRANSPORT`, `MCP_HTTP_HOST` and `MCP_HTTP_PORT` environment variables.

mod settings;

pub use settings::{
    is_loopback_host, GeneralSettings, ServerSettings, Settings, ToolSettings, TransportKind,
};
