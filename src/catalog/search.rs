//! Search tools.

use super::{bind, DEFAULT_SEARCH_LIMIT};
use crate::client::SharedClient;
use crate::extractor::ArgumentExtractor;
use crate::tool::{integer_property, object_schema, string_property, ToolDefinition};

pub fn all(client: &SharedClient) -> Vec<ToolDefinition> {
    vec![search_messages(client), search_public_chats(client)]
}

pub fn search_messages(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_search_messages",
        "Search for messages in a specific chat by text query.",
        object_schema(
            [
                ("chat_id", integer_property("The chat to search in")),
                ("query", string_property("The search query text")),
                (
                    "limit",
                    integer_property("Maximum number of results to return (default 20)"),
                ),
            ],
            &["chat_id", "query"],
        ),
        |client, arguments| async move {
            let args = ArgumentExtractor::new(&arguments);
            let chat_id = args.required_int64("chat_id")?;
            let query = args.required_string("query")?;
            let limit = args.optional_int("limit").unwrap_or(DEFAULT_SEARCH_LIMIT);
            client.search_messages(chat_id, &query, limit).await
        },
    )
}

pub fn search_public_chats(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_search_public_chats",
        "Search for public chats (channels and supergroups) by username or title.",
        object_schema(
            [("query", string_property("The search query (username or title)"))],
            &["query"],
        ),
        |client, arguments| async move {
            let query = ArgumentExtractor::new(&arguments).required_string("query")?;
            client.search_public_chats(&query).await
        },
    )
}
