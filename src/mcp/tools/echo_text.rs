use super::{require_str, schema_object, schema_string};
use crate::error::ToolError;
use crate::mcp::registry::{Arguments, FromArguments, Tool};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Echoes the `text` argument back unchanged.
pub struct EchoText;

#[derive(Debug, PartialEq)]
pub struct EchoInput {
    pub text: String,
}

impl FromArguments for EchoInput {
    fn from_arguments(args: &Arguments) -> Result<Self, ToolError> {
        Ok(Self {
            text: require_str(args, "text")?.to_string(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct EchoOutput {
    pub text: String,
}

#[async_trait::async_trait]
impl Tool for EchoText {
    type Input = EchoInput;
    type Output = EchoOutput;

    fn name(&self) -> &'static str {
        "echo_text"
    }

    fn description(&self) -> &'static str {
        "Echo back a provided string. An empty string is returned unchanged."
    }

    fn input_schema(&self) -> Value {
        schema_object(
            json!({ "text": schema_string("Text to echo back to the caller.") }),
            &["text"],
        )
    }

    fn output_schema(&self) -> Value {
        schema_object(
            json!({ "text": schema_string("The same text that was provided.") }),
            &["text"],
        )
    }

    async fn run(&self, input: EchoInput) -> Result<EchoOutput, ToolError> {
        Ok(EchoOutput { text: input.text })
    }
}
