//! Built-in tools and the helpers they share.

mod compute_sum;
mod echo_text;
mod health_check;

pub use compute_sum::{ComputeSum, SumInput, SumOutput};
pub use echo_text::{EchoInput, EchoOutput, EchoText};
pub use health_check::{HealthCheck, HealthInput, HealthOutput};

use super::registry::{Arguments, ToolRegistry};
use crate::error::ToolError;
use serde_json::{json, Value};

/// Registry with every built-in tool, in advertised order.
pub fn default_registry() -> ToolRegistry {
    ToolRegistry::builder()
        .register(HealthCheck)
        .register(EchoText)
        .register(ComputeSum)
        .build()
}

/// Fetch a required string field.
pub(crate) fn require_str<'a>(args: &'a Arguments, field: &str) -> Result<&'a str, ToolError> {
    match args.get(field) {
        None | Some(Value::Null) => Err(ToolError::missing(field)),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(ToolError::wrong_type(field, "string")),
    }
}

/// Fetch a required numeric field as a double.
pub(crate) fn require_f64(args: &Arguments, field: &str) -> Result<f64, ToolError> {
    match args.get(field) {
        None | Some(Value::Null) => Err(ToolError::missing(field)),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| ToolError::wrong_type(field, "number")),
        Some(_) => Err(ToolError::wrong_type(field, "number")),
    }
}

pub(crate) fn schema_object(properties: Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

pub(crate) fn schema_string(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description,
    })
}

pub(crate) fn schema_number(description: &str) -> Value {
    json!({
        "type": "number",
        "description": description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(value: Value) -> Arguments {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_default_registry_descriptors() {
        let registry = default_registry();
        let tools = registry.list();

        let names: Vec<_> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["health_check", "echo_text", "compute_sum"]);

        for tool in &tools {
            assert!(!tool.name.is_empty());
            assert!(!tool.description.is_empty());
            assert_eq!(tool.input_schema["type"], "object");
            assert!(tool.input_schema["properties"].is_object());
            assert!(tool.input_schema["required"].is_array());
            assert_eq!(tool.output_schema["type"], "object");
            assert!(tool.output_schema["properties"].is_object());
        }
    }

    #[test]
    fn test_require_str() {
        let a = args(json!({ "text": "hi", "n": 1, "nil": null }));
        assert_eq!(require_str(&a, "text"), Ok("hi"));
        assert_eq!(require_str(&a, "missing"), Err(ToolError::missing("missing")));
        assert_eq!(require_str(&a, "nil"), Err(ToolError::missing("nil")));
        assert_eq!(require_str(&a, "n"), Err(ToolError::wrong_type("n", "string")));
    }

    #[test]
    fn test_require_f64() {
        let a = args(json!({ "int": 2, "float": 1.5, "neg": -3, "s": "2" }));
        assert_eq!(require_f64(&a, "int"), Ok(2.0));
        assert_eq!(require_f64(&a, "float"), Ok(1.5));
        assert_eq!(require_f64(&a, "neg"), Ok(-3.0));
        assert_eq!(require_f64(&a, "s"), Err(ToolError::wrong_type("s", "number")));
        assert_eq!(require_f64(&a, "absent"), Err(ToolError::missing("absent")));
    }
}
