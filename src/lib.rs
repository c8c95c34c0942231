//! # Telegram MCP
//!
//! Exposes a Telegram account to AI agents as a fixed catalog of 29 tools
//! speaking the Model Context Protocol.
//!
//! ## Features
//!
//! - **Tool Catalog**: chats, messages, contacts, users, group administration and search
//! - **Argument Validation**: typed extraction with lenient identifier coercion
//! - **Deterministic Results**: JSON output with sorted keys
//! - **Concurrent Dispatch**: readers-writer registry, handlers run outside the lock
//! - **Pluggable Backend**: any [`TelegramClient`] implementation, including an in-memory account
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use telegram_mcp::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(InMemoryClient::demo(TelegramConfig::from_env()?));
//!     let server = TelegramMcpServer::new(client.clone());
//!
//!     server.start().await?;
//!     client.sign_in("+15550000", "12345").await?;
//!
//!     let content = server.execute_tool("telegram_get_me", Arguments::new()).await?;
//!     println!("{:?}", content);
//!
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod extractor;
pub mod json;
pub mod mcp;
pub mod tool;
pub mod value;

// Re-exports for convenient usage
pub use client::{AuthState, InMemoryClient, SharedClient, TelegramClient};
pub use config::TelegramConfig;
pub use error::{Result, TelegramError};
pub use extractor::ArgumentExtractor;
pub use mcp::{CallToolResult, Content, McpServer, TelegramMcpServer, ToolsListResponse};
pub use tool::{DynTool, Tool, ToolDefinition, ToolDescriptor, ToolExecutor, ToolRegistry};
pub use value::{Arguments, ResultMap, Value};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::client::{AuthState, InMemoryClient, SharedClient, TelegramClient};
    pub use crate::config::TelegramConfig;
    pub use crate::error::TelegramError;
    pub use crate::mcp::{Content, McpServer, TelegramMcpServer};
    pub use crate::tool::{Tool, ToolDefinition, ToolDescriptor, ToolRegistry};
    pub use crate::value::{Arguments, Value};
    pub use std::sync::Arc;
}
