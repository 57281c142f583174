//! Call command implementation.

use crate::config::Settings;
use crate::mcp::{McpServer, RequestEnvelope, ResponseEnvelope};
use anyhow::{Context, Result};
use serde_json::Value;

/// Invoke a single tool through the dispatcher and print the envelope.
pub async fn run_call(tool: &str, arguments: &str, settings: Settings) -> Result<()> {
    let envelope = call(tool, arguments, settings).await?;
    println!("{}", serde_json::to_string_pretty(&envelope)?);

    if envelope.is_error() {
        anyhow::bail!("{} returned an error", tool);
    }
    Ok(())
}

async fn call(tool: &str, arguments: &str, settings: Settings) -> Result<ResponseEnvelope> {
    let arguments: Value =
        serde_json::from_str(arguments).context("Arguments must be valid JSON")?;

    let server = McpServer::new(settings);
    Ok(server
        .dispatcher()
        .call_tool(RequestEnvelope::new(tool, arguments))
        .await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_call_runs_tool() {
        let envelope = call("compute_sum", r#"{"a":0.5,"b":0.25}"#, Settings::default())
            .await
            .unwrap();
        assert!(!envelope.is_error());
        assert_eq!(envelope.first_text(), Some(r#"{"result":0.75}"#));
    }

    #[tokio::test]
    async fn test_call_rejects_bad_json() {
        let err = call("echo_text", "{text", Settings::default()).await.unwrap_err();
        assert!(err.to_string().contains("valid JSON"));
    }
}
