//! Error types for the MCP specialist server.

use std::time::Duration;
use thiserror::Error;

/// Process-level error type.
///
/// Everything here is fatal to whatever owns it: configuration problems stop
/// startup, transport faults stop the transport.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for server operations.
pub type Result<T> = std::result::Result<T, ServerError>;

/// Failure of a single tool call.
///
/// The dispatcher never propagates these; each one becomes an error envelope.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments: {0}")]
    Validation(String),

    #[error("Tool execution failed: {0}")]
    Failed(String),

    #[error("timeout: operation exceeded {} seconds", .0.as_secs_f64())]
    Timeout(Duration),
}

impl ToolError {
    /// Missing required field.
    pub fn missing(field: &str) -> Self {
        Self::Validation(format!("missing required field '{}'", field))
    }

    /// Field present with the wrong JSON type.
    pub fn wrong_type(field: &str, expected: &str) -> Self {
        Self::Validation(format!("field '{}' must be a {}", field, expected))
    }

    /// Short machine-friendly label used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ToolError::UnknownTool(_) => "unknown_tool",
            ToolError::Validation(_) => "validation",
            ToolError::Failed(_) => "handler_failure",
            ToolError::Timeout(_) => "timeout",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error_messages() {
        assert_eq!(
            ToolError::UnknownTool("nonexistent".to_string()).to_string(),
            "Unknown tool: nonexistent"
        );
        assert_eq!(
            ToolError::missing("text").to_string(),
            "Invalid arguments: missing required field 'text'"
        );
        assert_eq!(
            ToolError::wrong_type("a", "number").to_string(),
            "Invalid arguments: field 'a' must be a number"
        );
        assert_eq!(
            ToolError::Timeout(Duration::from_secs(5)).to_string(),
            "timeout: operation exceeded 5 seconds"
        );
    }
}
