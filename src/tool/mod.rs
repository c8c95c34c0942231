pub mod executor;
pub mod registry;
pub mod schema;

pub use executor::{ToolCall, ToolExecutor};
pub use registry::ToolRegistry;
pub use schema::{
    array_property, boolean_property, integer_property, object_property, object_schema,
    string_property,
};
pub use tool_trait::{DynTool, Tool};
pub use tool_types::{ToolDefinition, ToolDescriptor, ToolHandler};

mod tool_types {
    use futures::future::{BoxFuture, FutureExt};
    use serde::Serialize;
    use std::fmt;
    use std::future::Future;
    use std::sync::Arc;

    use crate::error::Result;
    use crate::value::{Arguments, Value};

    /// Schema-carrying description of a callable tool.
    #[derive(Debug, Clone, PartialEq, Serialize)]
    pub struct ToolDescriptor {
        /// The name of the tool, unique within a registry
        pub name: String,
        /// A description of what the tool does
        pub description: String,
        /// JSON Schema for the tool's input parameters
        #[serde(rename = "inputSchema")]
        pub input_schema: Value,
    }

    impl ToolDescriptor {
        pub fn new(
            name: impl Into<String>,
            description: impl Into<String>,
            input_schema: Value,
        ) -> Self {
            Self {
                name: name.into(),
                description: description.into(),
                input_schema,
            }
        }

        /// Names listed in the schema's `required` array.
        pub fn required_arguments(&self) -> Vec<&str> {
            self.input_schema
                .as_object()
                .and_then(|schema| schema.get("required"))
                .and_then(Value::as_array)
                .map(|names| names.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default()
        }
    }

    /// Async function invoked with the call arguments, returning JSON text.
    pub type ToolHandler = Arc<dyn Fn(Arguments) -> BoxFuture<'static, Result<String>> + Send + Sync>;

    /// A descriptor paired with the handler that implements it.
    #[derive(Clone)]
    pub struct ToolDefinition {
        pub descriptor: ToolDescriptor,
        pub handler: ToolHandler,
    }

    impl ToolDefinition {
        /// Creates a definition from an async closure.
        pub fn new<F, Fut>(descriptor: ToolDescriptor, handler: F) -> Self
        where
            F: Fn(Arguments) -> Fut + Send + Sync + 'static,
            Fut: Future<Output = Result<String>> + Send + 'static,
        {
            Self {
                descriptor,
                handler: Arc::new(move |arguments| handler(arguments).boxed()),
            }
        }
    }

    impl fmt::Debug for ToolDefinition {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.debug_struct("ToolDefinition")
                .field("name", &self.descriptor.name)
                .finish()
        }
    }
}

mod tool_trait {
    use super::tool_types::{ToolDefinition, ToolDescriptor};
    use async_trait::async_trait;
    use std::sync::Arc;

    use crate::error::Result;
    use crate::value::Arguments;

    /// Trait representing a tool that can be registered and executed.
    #[async_trait]
    pub trait Tool: Send + Sync {
        /// Returns the tool's descriptor.
        fn descriptor(&self) -> &ToolDescriptor;

        /// Executes the tool, returning its JSON text result.
        async fn execute(&self, arguments: Arguments) -> Result<String>;

        /// Returns the name of the tool.
        fn name(&self) -> &str {
            &self.descriptor().name
        }
    }

    /// A type alias for a dynamic tool reference.
    pub type DynTool = Arc<dyn Tool>;

    #[async_trait]
    impl Tool for ToolDefinition {
        fn descriptor(&self) -> &ToolDescriptor {
            &self.descriptor
        }

        async fn execute(&self, arguments: Arguments) -> Result<String> {
            (self.handler)(arguments).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Arguments, Value};

    #[tokio::test]
    async fn test_definition_runs_handler() {
        let definition = ToolDefinition::new(
            ToolDescriptor::new(
                "echo",
                "Echo the text argument",
                object_schema([("text", string_property("Text to echo"))], &["text"]),
            ),
            |arguments: Arguments| async move {
                Ok(arguments
                    .get("text")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string())
            },
        );

        let mut arguments = Arguments::new();
        arguments.insert("text".into(), Value::from("hi"));
        assert_eq!(definition.name(), "echo");
        assert_eq!(definition.execute(arguments).await.unwrap(), "hi");
        assert_eq!(definition.descriptor.required_arguments(), vec!["text"]);
    }

    #[test]
    fn test_descriptor_serializes_in_mcp_shape() {
        let descriptor = ToolDescriptor::new("noop", "Does nothing", object_schema([], &[]));
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "noop",
                "description": "Does nothing",
                "inputSchema": {"type": "object", "properties": {}, "required": []}
            })
        );
    }
}
