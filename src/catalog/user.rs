//! User tools.

use super::bind;
use crate::client::SharedClient;
use crate::extractor::ArgumentExtractor;
use crate::tool::{integer_property, object_schema, ToolDefinition};

pub fn all(client: &SharedClient) -> Vec<ToolDefinition> {
    vec![
        get_me(client),
        get_user(client),
        block_user(client),
        unblock_user(client),
    ]
}

pub fn get_me(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_get_me",
        "Get information about the currently authenticated user.",
        object_schema([], &[]),
        |client, _arguments| async move { client.get_me().await },
    )
}

pub fn get_user(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_get_user",
        "Get information about a user by their ID.",
        object_schema(
            [("user_id", integer_property("The unique identifier of the user"))],
            &["user_id"],
        ),
        |client, arguments| async move {
            let user_id = ArgumentExtractor::new(&arguments).required_int64("user_id")?;
            client.get_user(user_id).await
        },
    )
}

pub fn block_user(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_block_user",
        "Block a user. Blocked users cannot send you messages.",
        object_schema(
            [("user_id", integer_property("The ID of the user to block"))],
            &["user_id"],
        ),
        |client, arguments| async move {
            let user_id = ArgumentExtractor::new(&arguments).required_int64("user_id")?;
            client.block_user(user_id).await
        },
    )
}

pub fn unblock_user(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_unblock_user",
        "Unblock a previously blocked user.",
        object_schema(
            [("user_id", integer_property("The ID of the user to unblock"))],
            &["user_id"],
        ),
        |client, arguments| async move {
            let user_id = ArgumentExtractor::new(&arguments).required_int64("user_id")?;
            client.unblock_user(user_id).await
        },
    )
}
