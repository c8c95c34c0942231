use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tool::ToolDescriptor;

/// A content block in a tool call response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    /// Text content
    Text {
        /// The text
        text: String,
    },
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text { text: text.into() }
    }

    /// Returns the text of a text block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text { text } => Some(text),
        }
    }
}

/// Response to `tools/list`.
#[derive(Debug, Clone, Serialize)]
pub struct ToolsListResponse {
    pub tools: Vec<ToolDescriptor>,
}

/// Response to `tools/call`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", default)]
    pub is_error: bool,
}

impl CallToolResult {
    /// Converts an execution outcome into a response.
    ///
    /// Errors become a single text block holding the error message.
    pub fn from_result(result: Result<Vec<Content>>) -> Self {
        match result {
            Ok(content) => Self {
                content,
                is_error: false,
            },
            Err(e) => Self {
                content: vec![Content::text(e.to_string())],
                is_error: true,
            },
        }
    }
}
