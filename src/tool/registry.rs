use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::tool::{DynTool, ToolDescriptor};

/// A concurrency-safe store of tools keyed by name.
///
/// Clones share the same underlying map. Reads (`get`, `list`) take the read
/// side of the lock; `register` takes the write side only for the map
/// mutation. The lock is never held while a tool runs.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Arc<RwLock<HashMap<String, DynTool>>>,
}

impl ToolRegistry {
    /// Creates a new empty tool registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry already holding `tools`.
    ///
    /// Later tools replace earlier ones with the same name.
    pub fn with_tools(tools: impl IntoIterator<Item = DynTool>) -> Self {
        let tools: HashMap<String, DynTool> = tools
            .into_iter()
            .map(|tool| (tool.name().to_string(), tool))
            .collect();
        debug!("Created tool registry with {} tools", tools.len());
        Self {
            tools: Arc::new(RwLock::new(tools)),
        }
    }

    /// Registers a tool, replacing any tool with the same name.
    pub async fn register(&self, tool: DynTool) {
        let name = tool.name().to_string();
        let replaced = self.tools.write().await.insert(name.clone(), tool);
        debug!("Registered tool {} (replaced: {})", name, replaced.is_some());
    }

    /// Registers every tool in `tools`.
    pub async fn register_all(&self, tools: impl IntoIterator<Item = DynTool>) {
        let tools: Vec<DynTool> = tools.into_iter().collect();
        let mut map = self.tools.write().await;
        for tool in tools {
            map.insert(tool.name().to_string(), tool);
        }
        debug!("Registry now holds {} tools", map.len());
    }

    /// Gets a tool by name.
    pub async fn get(&self, name: &str) -> Option<DynTool> {
        self.tools.read().await.get(name).cloned()
    }

    /// Returns a snapshot of the registered descriptors.
    pub async fn list(&self) -> Vec<ToolDescriptor> {
        self.tools
            .read()
            .await
            .values()
            .map(|tool| tool.descriptor().clone())
            .collect()
    }

    /// Returns the registered tool names, sorted.
    pub async fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.read().await.keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of registered tools.
    pub async fn len(&self) -> usize {
        self.tools.read().await.len()
    }

    /// Returns whether the registry is empty.
    pub async fn is_empty(&self) -> bool {
        self.tools.read().await.is_empty()
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("ToolRegistry");
        match self.tools.try_read() {
            Ok(tools) => debug.field("tools_count", &tools.len()),
            Err(_) => debug.field("tools_count", &"<locked>"),
        };
        debug.finish()
    }
}
