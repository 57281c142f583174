//! Tool registry.
//!
//! Tools are written against the typed [`Tool`] trait. The registry stores
//! them behind the object-safe [`ToolHandler`] trait, which owns argument
//! validation and result serialization so the dispatcher only ever sees JSON.

use super::protocol::ToolDescriptor;
use crate::error::ToolError;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Decoded `arguments` object of a call.
pub type Arguments = Map<String, Value>;

/// Typed input of a tool, built by explicit field checks.
pub trait FromArguments: Sized {
    fn from_arguments(args: &Arguments) -> Result<Self, ToolError>;
}

/// A tool with a concrete input and output contract.
#[async_trait::async_trait]
pub trait Tool: Send + Sync + 'static {
    type Input: FromArguments + Send;
    type Output: Serialize + Send;

    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// JSON Schema advertised for the input.
    fn input_schema(&self) -> Value;

    /// JSON Schema advertised for the success payload.
    fn output_schema(&self) -> Value;

    async fn run(&self, input: Self::Input) -> Result<Self::Output, ToolError>;
}

/// Type-erased tool, as stored in the registry.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    fn descriptor(&self) -> ToolDescriptor;

    /// Validate `args`, run the tool and serialize its output.
    async fn invoke(&self, args: Arguments) -> Result<Value, ToolError>;
}

#[async_trait::async_trait]
impl<T: Tool> ToolHandler for T {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
            output_schema: self.output_schema(),
        }
    }

    async fn invoke(&self, args: Arguments) -> Result<Value, ToolError> {
        let input = T::Input::from_arguments(&args)?;
        let output = self.run(input).await?;
        serde_json::to_value(output).map_err(|e| ToolError::Failed(e.to_string()))
    }
}

struct Entry {
    descriptor: ToolDescriptor,
    handler: Arc<dyn ToolHandler>,
}

/// Immutable mapping from tool name to descriptor and handler.
pub struct ToolRegistry {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Start building a registry.
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// Descriptors in registration order.
    pub fn list(&self) -> Vec<ToolDescriptor> {
        self.entries.iter().map(|e| e.descriptor.clone()).collect()
    }

    /// Find the handler registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.index
            .get(name)
            .map(|&i| Arc::clone(&self.entries[i].handler))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collects tools before the registry is frozen.
#[derive(Default)]
pub struct ToolRegistryBuilder {
    handlers: Vec<Arc<dyn ToolHandler>>,
}

impl ToolRegistryBuilder {
    pub fn register(mut self, tool: impl ToolHandler + 'static) -> Self {
        self.handlers.push(Arc::new(tool));
        self
    }

    /// Freeze the registry. Later registrations of a name replace earlier ones
    /// in place, so listing order stays the order of first registration.
    pub fn build(self) -> ToolRegistry {
        let mut entries: Vec<Entry> = Vec::with_capacity(self.handlers.len());
        let mut index = HashMap::new();

        for handler in self.handlers {
            let descriptor = handler.descriptor();
            match index.get(&descriptor.name) {
                Some(&i) => {
                    tracing::warn!(tool = %descriptor.name, "Duplicate tool registration, replacing");
                    entries[i] = Entry { descriptor, handler };
                }
                None => {
                    index.insert(descriptor.name.clone(), entries.len());
                    entries.push(Entry { descriptor, handler });
                }
            }
        }

        ToolRegistry { entries, index }
    }
}
