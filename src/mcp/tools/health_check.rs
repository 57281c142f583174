use super::{schema_object, schema_string};
use crate::error::ToolError;
use crate::mcp::registry::{Arguments, FromArguments, Tool};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Liveness probe. Takes no arguments and always reports `ok`.
pub struct HealthCheck;

pub struct HealthInput;

impl FromArguments for HealthInput {
    fn from_arguments(_args: &Arguments) -> Result<Self, ToolError> {
        Ok(HealthInput)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthOutput {
    pub status: String,
}

#[async_trait::async_trait]
impl Tool for HealthCheck {
    type Input = HealthInput;
    type Output = HealthOutput;

    fn name(&self) -> &'static str {
        "health_check"
    }

    fn description(&self) -> &'static str {
        "Return a simple health status. Takes no arguments and returns {\"status\":\"ok\"}."
    }

    fn input_schema(&self) -> Value {
        schema_object(json!({}), &[])
    }

    fn output_schema(&self) -> Value {
        let mut status = schema_string("Health status indicator");
        status["enum"] = json!(["ok"]);
        schema_object(json!({ "status": status }), &["status"])
    }

    async fn run(&self, _input: HealthInput) -> Result<HealthOutput, ToolError> {
        Ok(HealthOutput {
            status: "ok".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::registry::ToolHandler;

    #[tokio::test]
    async fn test_health_ignores_arguments() {
        let mut args = Arguments::new();
        args.insert("unexpected".to_string(), json!(true));

        let value = HealthCheck.invoke(args).await.unwrap();
        assert_eq!(value, json!({ "status": "ok" }));
    }
}
