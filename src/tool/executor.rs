use tracing::debug;

use crate::error::{Result, TelegramError};
use crate::mcp::Content;
use crate::tool::{ToolDescriptor, ToolRegistry};
use crate::value::Arguments;

/// A pending tool invocation.
#[derive(Debug, Clone)]
pub struct ToolCall {
    /// The tool name
    pub name: String,
    /// The call arguments
    pub arguments: Arguments,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: Arguments) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// Dispatches tool calls to the tools held in a registry.
///
/// The executor adds no timeout, retry or per-tool serialization: a call
/// runs once and its error, if any, is returned unchanged.
#[derive(Debug, Clone)]
pub struct ToolExecutor {
    registry: ToolRegistry,
}

impl ToolExecutor {
    /// Creates a new tool executor with the given registry.
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Returns the registry this executor dispatches to.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Returns all tool descriptors.
    pub async fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.registry.list().await
    }

    /// Executes a single tool call.
    ///
    /// Fails with `ToolNotFound` when no tool has the name. The tool's text
    /// result is wrapped as a single text content block.
    pub async fn execute(&self, name: &str, arguments: Arguments) -> Result<Vec<Content>> {
        let tool = self
            .registry
            .get(name)
            .await
            .ok_or_else(|| TelegramError::ToolNotFound(name.to_string()))?;

        debug!("Executing tool {} with {} arguments", name, arguments.len());
        let text = tool.execute(arguments).await?;
        Ok(vec![Content::text(text)])
    }

    /// Executes independent tool calls concurrently.
    ///
    /// Results are returned in the order of `calls`. A call whose task
    /// panics reports `ToolExecutionFailed`.
    pub async fn execute_all(&self, calls: Vec<ToolCall>) -> Vec<Result<Vec<Content>>> {
        let handles: Vec<_> = calls
            .into_iter()
            .map(|call| {
                let executor = self.clone();
                tokio::spawn(async move { executor.execute(&call.name, call.arguments).await })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in futures::future::join_all(handles).await {
            results.push(match handle {
                Ok(result) => result,
                Err(e) => Err(TelegramError::ToolExecutionFailed(e.to_string())),
            });
        }
        results
    }
}
