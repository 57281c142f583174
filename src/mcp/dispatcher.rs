//! Protocol dispatcher.
//!
//! Turns decoded messages into responses. Shared by every transport; it never
//! touches stdin, stdout or sockets itself.

use super::protocol::*;
use super::registry::{Arguments, ToolRegistry};
use crate::error::ToolError;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinError;

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "mcp-specialist";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Routes requests to tools in a read-only registry.
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    call_timeout: Duration,
}

impl Dispatcher {
    pub fn new(registry: ToolRegistry, call_timeout: Duration) -> Self {
        Self {
            registry: Arc::new(registry),
            call_timeout,
        }
    }

    /// Descriptors of every registered tool, in registration order.
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.registry.list()
    }

    /// Run one tool call. Every failure becomes an error envelope.
    pub async fn call_tool(&self, request: RequestEnvelope) -> ResponseEnvelope {
        let tool = request.tool_name.clone();
        match self.try_call(request).await {
            Ok(value) => {
                tracing::debug!(tool = %tool, "Tool call succeeded");
                ResponseEnvelope::text(value.to_string())
            }
            Err(e) => {
                tracing::error!(tool = %tool, kind = e.kind(), "{}", e);
                ResponseEnvelope::error(&e.to_string())
            }
        }
    }

    async fn try_call(&self, request: RequestEnvelope) -> Result<Value, ToolError> {
        let handler = self
            .registry
            .lookup(&request.tool_name)
            .ok_or_else(|| ToolError::UnknownTool(request.tool_name.clone()))?;

        let args: Arguments = match request.arguments {
            Value::Null => Arguments::new(),
            Value::Object(map) => map,
            _ => {
                return Err(ToolError::Validation(
                    "arguments must be an object".to_string(),
                ))
            }
        };

        // A panic inside the tool surfaces here as a JoinError.
        let task = tokio::spawn(async move { handler.invoke(args).await });
        let abort = task.abort_handle();

        match tokio::time::timeout(self.call_timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(ToolError::Failed(join_error_message(e))),
            Err(_) => {
                abort.abort();
                Err(ToolError::Timeout(self.call_timeout))
            }
        }
    }

    /// Handle one raw message. `None` means nothing should be written back.
    pub async fn handle_message(&self, raw: &str) -> Option<OutboundMessage> {
        let value: Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Failed to parse message: {}", e);
                return Some(OutboundMessage::Rpc(JsonRpcResponse::error(
                    None,
                    PARSE_ERROR,
                    "Parse error",
                )));
            }
        };

        let id = value.get("id").cloned();
        match serde_json::from_value::<InboundMessage>(value) {
            Ok(InboundMessage::Rpc(request)) => {
                self.handle_request(request).await.map(OutboundMessage::Rpc)
            }
            Ok(InboundMessage::Envelope(envelope)) => {
                Some(OutboundMessage::Envelope(self.call_tool(envelope).await))
            }
            Err(e) => {
                tracing::warn!("Invalid request: {}", e);
                Some(OutboundMessage::Rpc(JsonRpcResponse::error(
                    id,
                    INVALID_REQUEST,
                    "Invalid Request",
                )))
            }
        }
    }

    /// Handle a single JSON-RPC request.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            tracing::debug!(method = %request.method, "Notification received");
            return None;
        }

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                request.id,
                INVALID_REQUEST,
                &format!("Unsupported jsonrpc version: {}", request.jsonrpc),
            ));
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            _ => JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                &format!("Method not found: {}", request.method),
            ),
        };
        Some(response)
    }

    fn handle_initialize(&self, id: Option<Value>) -> JsonRpcResponse {
        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability { list_changed: false },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
        };
        success(id, &result)
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        success(
            id,
            &ToolsListResult {
                tools: self.list_tools(),
            },
        )
    }

    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let request: RequestEnvelope = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(request) => request,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        INVALID_PARAMS,
                        &format!("Invalid params: {}", e),
                    )
                }
            },
            None => return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params"),
        };

        let envelope = self.call_tool(request).await;
        success(id, &envelope)
    }
}

fn success<T: Serialize>(id: Option<Value>, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, &e.to_string()),
    }
}

fn join_error_message(e: JoinError) -> String {
    if e.is_cancelled() {
        return "task was cancelled".to_string();
    }
    let panic = e.into_panic();
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("panicked: {}", s)
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("panicked: {}", s)
    } else {
        "panicked".to_string()
    }
}
