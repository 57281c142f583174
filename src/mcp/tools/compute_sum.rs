use super::{require_f64, schema_number, schema_object};
use crate::error::ToolError;
use crate::mcp::registry::{Arguments, FromArguments, Tool};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Adds two numbers with plain `f64` semantics.
pub struct ComputeSum;

#[derive(Debug, PartialEq)]
pub struct SumInput {
    pub a: f64,
    pub b: f64,
}

impl FromArguments for SumInput {
    fn from_arguments(args: &Arguments) -> Result<Self, ToolError> {
        Ok(Self {
            a: require_f64(args, "a")?,
            b: require_f64(args, "b")?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SumOutput {
    pub result: f64,
}

#[async_trait::async_trait]
impl Tool for ComputeSum {
    type Input = SumInput;
    type Output = SumOutput;

    fn name(&self) -> &'static str {
        "compute_sum"
    }

    fn description(&self) -> &'static str {
        "Add two numbers together and return the sum."
    }

    fn input_schema(&self) -> Value {
        schema_object(
            json!({
                "a": schema_number("The first addend."),
                "b": schema_number("The second addend."),
            }),
            &["a", "b"],
        )
    }

    fn output_schema(&self) -> Value {
        schema_object(
            json!({ "result": schema_number("The sum of the two inputs.") }),
            &["result"],
        )
    }

    async fn run(&self, input: SumInput) -> Result<SumOutput, ToolError> {
        // Give the scheduler one turn before computing.
        tokio::task::yield_now().await;
        Ok(SumOutput {
            result: input.a + input.b,
        })
    }
}
