pub mod protocol;
pub mod server;

pub use protocol::{CallToolResult, Content, ToolsListResponse};
pub use server::{McpServer, TelegramMcpServer};
