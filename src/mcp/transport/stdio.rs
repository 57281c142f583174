//! Newline-delimited JSON over stdin/stdout.
//!
//! stdout carries protocol messages only. Diagnostics go through `tracing`,
//! which writes to stderr.

use super::Transport;
use crate::config::TransportKind;
use crate::error::{Result, ServerError};
use crate::mcp::protocol::{JsonRpcResponse, OutboundMessage, PARSE_ERROR};
use crate::mcp::Dispatcher;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

pub struct StdioTransport;

impl StdioTransport {
    pub fn new() -> Self {
        Self
    }

    /// Read messages from `reader` until EOF, answering each on `writer`.
    pub async fn serve_io<R, W>(dispatcher: &Dispatcher, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .await
                .map_err(|e| ServerError::Transport(format!("stdin read failed: {}", e)))?;
            if read == 0 {
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => dispatcher.handle_message(line.trim()).await,
                Err(e) => {
                    tracing::warn!("Discarding non UTF-8 input: {}", e);
                    Some(OutboundMessage::Rpc(JsonRpcResponse::error(
                        None,
                        PARSE_ERROR,
                        "Parse error",
                    )))
                }
            };

            if let Some(response) = response {
                let mut encoded = serde_json::to_string(&response)?;
                encoded.push('\n');
                writer
                    .write_all(encoded.as_bytes())
                    .await
                    .map_err(|e| ServerError::Transport(format!("stdout write failed: {}", e)))?;
                writer
                    .flush()
                    .await
                    .map_err(|e| ServerError::Transport(format!("stdout flush failed: {}", e)))?;
            }
        }

        tracing::info!("stdin closed, shutting down");
        Ok(())
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Transport for StdioTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Stdio
    }

    fn describe(&self) -> String {
        "stdio".to_string()
    }

    async fn serve(self: Box<Self>, dispatcher: Arc<Dispatcher>) -> Result<()> {
        tracing::info!("MCP server listening on stdio");
        Self::serve_io(&dispatcher, tokio::io::stdin(), tokio::io::stdout()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::tools::default_registry;
    use serde_json::{json, Value};
    use std::time::Duration;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(default_registry(), Duration::from_secs(5))
    }

    async fn exchange(input: &str) -> Vec<Value> {
        let mut out = Vec::new();
        StdioTransport::serve_io(&dispatcher(), input.as_bytes(), &mut out)
            .await
            .unwrap();
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_session_in_order() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"health_check","arguments":{}}}"#,
            "\n",
        );

        let responses = exchange(input).await;
        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["id"], json!(1));
        assert_eq!(responses[1]["id"], json!(2));
        assert_eq!(responses[2]["id"], json!(3));
        assert_eq!(
            responses[2]["result"]["content"][0]["text"],
            r#"{"status":"ok"}"#
        );
    }

    #[tokio::test]
    async fn test_bare_envelope_without_trailing_newline() {
        let responses =
            exchange(r#"{"toolName":"echo_text","arguments":{"text":"hello"}}"#).await;
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["content"][0]["text"], r#"{"text":"hello"}"#);
        assert!(responses[0].get("isError").is_none());
    }

    #[tokio::test]
    async fn test_crlf_lines() {
        let responses = exchange("{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\r\n").await;
        assert_eq!(responses, vec![json!({ "jsonrpc": "2.0", "id": 1, "result": {} })]);
    }

    #[tokio::test]
    async fn test_parse_error_written_as_single_line() {
        let reader = tokio_test::io::Builder::new().read(b"{oops\n").build();
        let writer = tokio_test::io::Builder::new()
            .write(br#"{"jsonrpc":"2.0","id":null,"error":{"code":-32700,"message":"Parse error"}}"#)
            .write(b"\n")
            .build();

        tokio_test::assert_ok!(StdioTransport::serve_io(&dispatcher(), reader, writer).await);
    }

    #[tokio::test]
    async fn test_invalid_utf8_is_parse_error() {
        let mut input = vec![0xff, 0xfe];
        input.push(b'\n');
        let mut out = Vec::new();
        StdioTransport::serve_io(&dispatcher(), input.as_slice(), &mut out)
            .await
            .unwrap();

        let response: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(response["error"]["code"], json!(PARSE_ERROR));
    }

    #[tokio::test]
    async fn test_read_failure_is_transport_error() {
        let reader = tokio_test::io::Builder::new()
            .read_error(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"))
            .build();
        let result = StdioTransport::serve_io(&dispatcher(), reader, Vec::new()).await;
        assert!(matches!(result, Err(ServerError::Transport(_))));
    }
}
