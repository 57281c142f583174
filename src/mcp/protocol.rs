//! MCP protocol types (JSON-RPC 2.0 plus the tool envelopes).

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const JSONRPC_VERSION: &str = "2.0";

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

/// JSON-RPC request. A missing `id` marks a notification; an explicit
/// `"id": null` is a request answered with a null id.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default, deserialize_with = "present_id")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

fn present_id<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl JsonRpcRequest {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// JSON-RPC response.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: id.unwrap_or(Value::Null),
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Option<Value>, code: i32, message: &str) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: id.unwrap_or(Value::Null),
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.to_string(),
                data: None,
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// MCP Initialize response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: ToolsCapability,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {
    #[serde(rename = "listChanged")]
    pub list_changed: bool,
}

#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

/// Advertised description of a tool.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
    pub output_schema: Value,
}

/// Tools list response.
#[derive(Debug, Serialize)]
pub struct ToolsListResult {
    pub tools: Vec<ToolDescriptor>,
}

/// A single tool invocation.
///
/// Accepted both as `tools/call` params (`name`) and as a bare envelope
/// (`toolName`).
#[derive(Debug, Deserialize, Clone)]
pub struct RequestEnvelope {
    #[serde(rename = "toolName", alias = "name")]
    pub tool_name: String,
    #[serde(default)]
    pub arguments: Value,
}

impl RequestEnvelope {
    pub fn new(tool_name: impl Into<String>, arguments: Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments,
        }
    }
}

/// Result of a tool invocation.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResponseEnvelope {
    pub content: Vec<ToolContent>,
    #[serde(rename = "isError", default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ResponseEnvelope {
    pub fn text(text: String) -> Self {
        Self {
            content: vec![ToolContent::Text { text }],
            is_error: None,
        }
    }

    /// Error envelope whose text is `{"error": message}`.
    pub fn error(message: &str) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: json!({ "error": message }).to_string(),
            }],
            is_error: Some(true),
        }
    }

    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }

    /// Text of the first content item.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|c| match c {
            ToolContent::Text { text } => text.as_str(),
        })
    }
}

/// Anything a transport may receive.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum InboundMessage {
    Rpc(JsonRpcRequest),
    Envelope(RequestEnvelope),
}

/// Anything a transport may send back.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum OutboundMessage {
    Rpc(JsonRpcResponse),
    Envelope(ResponseEnvelope),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let envelope = ResponseEnvelope::text(r#"{"status":"ok"}"#.to_string());
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({ "content": [{ "type": "text", "text": "{\"status\":\"ok\"}" }] })
        );
    }

    #[test]
    fn test_error_envelope_shape() {
        let envelope = ResponseEnvelope::error("Unknown tool: nope");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["isError"], json!(true));

        let text: Value = serde_json::from_str(envelope.first_text().unwrap()).unwrap();
        assert_eq!(text, json!({ "error": "Unknown tool: nope" }));
    }

    #[test]
    fn test_inbound_distinguishes_rpc_from_envelope() {
        let rpc: InboundMessage =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#).unwrap();
        assert!(matches!(rpc, InboundMessage::Rpc(ref r) if r.method == "tools/list"));

        let bare: InboundMessage =
            serde_json::from_str(r#"{"toolName":"echo_text","arguments":{"text":"hi"}}"#).unwrap();
        assert!(matches!(bare, InboundMessage::Envelope(ref e) if e.tool_name == "echo_text"));

        assert!(serde_json::from_str::<InboundMessage>(r#"{"foo":1}"#).is_err());
    }

    #[test]
    fn test_null_id_is_not_a_notification() {
        let request: JsonRpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#).unwrap();
        assert_eq!(request.id, Some(Value::Null));
        assert!(!request.is_notification());

        let request: JsonRpcRequest =
            serde_json::from_str(r#"{"jsonrpc":"2.0","method":"ping"}"#).unwrap();
        assert!(request.is_notification());
    }

    #[test]
    fn test_call_params_accept_name_alias() {
        let envelope: RequestEnvelope =
            serde_json::from_value(json!({ "name": "health_check" })).unwrap();
        assert_eq!(envelope.tool_name, "health_check");
        assert_eq!(envelope.arguments, Value::Null);
    }

    #[test]
    fn test_error_response_carries_null_id() {
        let response = JsonRpcResponse::error(None, PARSE_ERROR, "Parse error");
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"jsonrpc":"2.0","id":null,"error":{"code":-32700,"message":"Parse error"}}"#
        );
    }
}
