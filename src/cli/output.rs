//! CLI output formatting utilities.
//!
//! Never used while the stdio transport owns stdout.

use crate::mcp::ToolDescriptor;
use console::style;
use serde_json::Value;

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a tool descriptor with its input fields.
    pub fn tool(tool: &ToolDescriptor) {
        println!("\n  {} {}", style("*").cyan(), style(&tool.name).bold());
        println!("    {}", tool.description);
        for (field, kind, required) in schema_fields(&tool.input_schema) {
            let marker = if required { "" } else { "?" };
            println!("    {}{}: {}", style(field).dim(), marker, kind);
        }
    }
}

/// `(name, type, required)` for each property of an object schema.
fn schema_fields(schema: &Value) -> Vec<(String, String, bool)> {
    let required: Vec<&str> = schema["required"]
        .as_array()
        .map(|r| r.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    schema["properties"]
        .as_object()
        .map(|props| {
            props
                .iter()
                .map(|(name, prop)| {
                    let kind = prop["type"].as_str().unwrap_or("any").to_string();
                    (name.clone(), kind, required.contains(&name.as_str()))
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_fields() {
        let schema = json!({
            "type": "object",
            "properties": {
                "a": { "type": "number" },
                "note": {}
            },
            "required": ["a"]
        });
        let mut fields = schema_fields(&schema);
        fields.sort();
        assert_eq!(
            fields,
            vec![
                ("a".to_string(), "number".to_string(), true),
                ("note".to_string(), "any".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_schema_fields_empty_object() {
        assert!(schema_fields(&json!({ "type": "object", "properties": {} })).is_empty());
        assert!(schema_fields(&json!(null)).is_empty());
    }
}
