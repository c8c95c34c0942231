use async_trait::async_trait;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use crate::catalog;
use crate::client::SharedClient;
use crate::error::Result;
use crate::mcp::{CallToolResult, Content};
use crate::tool::{DynTool, ToolDescriptor, ToolExecutor, ToolRegistry};
use crate::value::Arguments;

/// The surface an agent-protocol transport drives.
#[async_trait]
pub trait McpServer: Send + Sync {
    fn name(&self) -> &str;
    fn version(&self) -> &str;
    fn is_running(&self) -> bool;

    /// Starts the backing client.
    async fn start(&self) -> Result<()>;

    /// Stops the backing client.
    async fn stop(&self);

    /// Descriptors of every registered tool, in no particular order.
    async fn list_tools(&self) -> Vec<ToolDescriptor>;

    /// Runs one tool and returns its result as content blocks.
    async fn execute_tool(&self, name: &str, arguments: Arguments) -> Result<Vec<Content>>;
}

/// MCP server exposing a Telegram account as tools.
///
/// The full catalog is registered before `new` returns, so `list_tools` and
/// `execute_tool` see every tool from the first call on.
pub struct TelegramMcpServer {
    client: SharedClient,
    executor: ToolExecutor,
    running: AtomicBool,
}

impl TelegramMcpServer {
    pub const NAME: &'static str = "telegram";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(client: SharedClient) -> Self {
        let tools = catalog::all(&client)
            .into_iter()
            .map(|definition| Arc::new(definition) as DynTool);
        let registry = ToolRegistry::with_tools(tools);
        info!("Telegram MCP server created with {} tools", catalog::TOOL_NAMES.len());

        Self {
            client,
            executor: ToolExecutor::new(registry),
            running: AtomicBool::new(false),
        }
    }

    /// The underlying client, used to drive the login flow.
    pub fn client(&self) -> &SharedClient {
        &self.client
    }

    pub fn executor(&self) -> &ToolExecutor {
        &self.executor
    }

    /// Adds a tool next to the catalog, replacing any tool with its name.
    pub async fn register_custom_tool(&self, tool: DynTool) {
        info!("Registering custom tool {}", tool.name());
        self.executor.registry().register(tool).await;
    }

    /// Registered tool names, sorted.
    pub async fn tool_names(&self) -> Vec<String> {
        self.executor.registry().names().await
    }

    /// Runs a tool and reports failure inside the response.
    pub async fn call_tool(&self, name: &str, arguments: Arguments) -> CallToolResult {
        let result = self.execute_tool(name, arguments).await;
        if let Err(e) = &result {
            warn!("Tool {} failed: {}", name, e);
        }
        CallToolResult::from_result(result)
    }
}

#[async_trait]
impl McpServer for TelegramMcpServer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn version(&self) -> &str {
        Self::VERSION
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    async fn start(&self) -> Result<()> {
        self.client.initialize().await?;
        self.running.store(true, Ordering::SeqCst);
        info!("{} server {} started", Self::NAME, Self::VERSION);
        Ok(())
    }

    async fn stop(&self) {
        self.client.close().await;
        self.running.store(false, Ordering::SeqCst);
        info!("{} server stopped", Self::NAME);
    }

    async fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.executor.list_tools().await
    }

    async fn execute_tool(&self, name: &str, arguments: Arguments) -> Result<Vec<Content>> {
        self.executor.execute(name, arguments).await
    }
}

impl fmt::Debug for TelegramMcpServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramMcpServer")
            .field("running", &self.is_running())
            .field("executor", &self.executor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::arguments;
    use crate::client::{InMemoryClient, MockTelegramClient};
    use crate::config::TelegramConfig;
    use crate::error::TelegramError;
    use crate::tool::{object_schema, ToolDefinition};
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    fn mock_server(mock: MockTelegramClient) -> TelegramMcpServer {
        TelegramMcpServer::new(Arc::new(mock))
    }

    fn text(content: &[Content]) -> serde_json::Value {
        assert_eq!(content.len(), 1);
        serde_json::from_str(content[0].as_text().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_catalog_is_ready_after_construction() {
        let server = mock_server(MockTelegramClient::new());
        assert_eq!(server.name(), "telegram");
        assert_eq!(server.version(), "1.0.0");
        assert!(!server.is_running());

        let mut expected: Vec<String> = catalog::TOOL_NAMES.iter().map(|n| n.to_string()).collect();
        expected.sort();
        assert_eq!(server.tool_names().await, expected);
        assert_eq!(server.list_tools().await.len(), 29);
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let server = mock_server(MockTelegramClient::new());
        assert_eq!(
            assert_err!(server.execute_tool("nonexistent_tool", Arguments::new()).await),
            TelegramError::ToolNotFound("nonexistent_tool".into())
        );

        let response = server.call_tool("nonexistent_tool", Arguments::new()).await;
        assert!(response.is_error);
        assert_eq!(response.content, vec![Content::text("Tool not found: nonexistent_tool")]);
    }

    #[tokio::test]
    async fn test_start_and_stop_drive_client() {
        let mut mock = MockTelegramClient::new();
        mock.expect_initialize().times(1).returning(|| Ok(()));
        mock.expect_close().times(1).returning(|| ());
        let server = mock_server(mock);

        assert_ok!(server.start().await);
        assert!(server.is_running());
        server.stop().await;
        assert!(!server.is_running());
    }

    #[tokio::test]
    async fn test_failed_start_leaves_server_stopped() {
        let mut mock = MockTelegramClient::new();
        mock.expect_initialize()
            .returning(|| Err(TelegramError::MissingConfiguration("API Hash is required".into())));
        let server = mock_server(mock);

        assert_err!(server.start().await);
        assert!(!server.is_running());
    }

    #[tokio::test]
    async fn test_custom_tool_replaces_by_name() {
        let server = mock_server(MockTelegramClient::new());
        let custom = ToolDefinition::new(
            ToolDescriptor::new("telegram_get_me", "Overridden", object_schema([], &[])),
            |_args: Arguments| async move { Ok(r#"{"custom":true}"#.to_string()) },
        );
        server.register_custom_tool(Arc::new(custom)).await;

        assert_eq!(server.tool_names().await.len(), 29);
        let content = assert_ok!(server.execute_tool("telegram_get_me", Arguments::new()).await);
        assert_eq!(text(&content), json!({"custom": true}));
    }

    #[tokio::test]
    async fn test_in_memory_account_end_to_end() {
        let client = Arc::new(InMemoryClient::demo(TelegramConfig::new(1, "hash")));
        let server = TelegramMcpServer::new(client.clone());

        assert_eq!(
            assert_err!(server.execute_tool("telegram_get_me", Arguments::new()).await),
            TelegramError::ClientNotInitialized
        );
        assert_ok!(server.start().await);
        assert_eq!(
            assert_err!(server.execute_tool("telegram_get_me", Arguments::new()).await),
            TelegramError::NotAuthorized
        );
        assert_ok!(client.sign_in("+15550000", "12345").await);

        let me = text(&server.execute_tool("telegram_get_me", Arguments::new()).await.unwrap());
        assert_eq!(me["id"], json!(1000));

        let sent = text(
            &server
                .execute_tool(
                    "telegram_send_message",
                    arguments(json!({"chat_id": "1001", "text": "On my way"})),
                )
                .await
                .unwrap(),
        );
        assert_eq!(sent["text"], json!("On my way"));

        let history = text(
            &server
                .execute_tool("telegram_get_chat_history", arguments(json!({"chat_id": 1001, "limit": 1})))
                .await
                .unwrap(),
        );
        assert_eq!(history["messages"][0]["id"], sent["id"]);

        assert_eq!(
            assert_err!(
                server
                    .execute_tool("telegram_get_chat", arguments(json!({"chat_id": 4242})))
                    .await
            ),
            TelegramError::ChatNotFound(4242)
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_calls_are_independent() {
        let client = Arc::new(InMemoryClient::demo(TelegramConfig::new(1, "hash")));
        let server = Arc::new(TelegramMcpServer::new(client.clone()));
        server.start().await.unwrap();
        client.sign_in("+15550000", "12345").await.unwrap();

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let server = Arc::clone(&server);
                tokio::spawn(async move {
                    let name = if i % 2 == 0 { "telegram_get_me" } else { "telegram_get_contacts" };
                    server.execute_tool(name, Arguments::new()).await
                })
            })
            .collect();

        for handle in handles {
            assert_ok!(handle.await.unwrap());
        }
    }
}
