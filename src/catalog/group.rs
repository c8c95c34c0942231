//! Group administration tools.

use super::{bind, DEFAULT_MEMBER_LIMIT};
use crate::client::SharedClient;
use crate::extractor::ArgumentExtractor;
use crate::tool::{array_property, integer_property, object_schema, ToolDefinition};
use crate::value::Value;

pub fn all(client: &SharedClient) -> Vec<ToolDefinition> {
    vec![
        get_chat_members(client),
        add_chat_members(client),
        promote_admin(client),
        demote_admin(client),
        ban_user(client),
        unban_user(client),
    ]
}

/// Schema shared by the tools acting on one member of one chat.
fn member_schema(user_description: &str) -> Value {
    object_schema(
        [
            ("chat_id", integer_property("The unique identifier of the chat")),
            ("user_id", integer_property(user_description)),
        ],
        &["chat_id", "user_id"],
    )
}

pub fn get_chat_members(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_get_chat_members",
        "Get the list of members in a group or channel.",
        object_schema(
            [
                ("chat_id", integer_property("The unique identifier of the chat")),
                (
                    "limit",
                    integer_property("Maximum number of members to return (default 200)"),
                ),
            ],
            &["chat_id"],
        ),
        |client, arguments| async move {
            let args = ArgumentExtractor::new(&arguments);
            let chat_id = args.required_int64("chat_id")?;
            let limit = args.optional_int("limit").unwrap_or(DEFAULT_MEMBER_LIMIT);
            client.get_chat_members(chat_id, limit).await
        },
    )
}

pub fn add_chat_members(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_add_chat_members",
        "Add users to a group or channel.",
        object_schema(
            [
                ("chat_id", integer_property("The unique identifier of the chat")),
                ("user_ids", array_property("Array of user IDs to add", "integer")),
            ],
            &["chat_id", "user_ids"],
        ),
        |client, arguments| async move {
            let args = ArgumentExtractor::new(&arguments);
            let chat_id = args.required_int64("chat_id")?;
            let user_ids = args.required_int64_array("user_ids")?;
            client.add_chat_members(chat_id, &user_ids).await
        },
    )
}

pub fn promote_admin(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_promote_admin",
        "Promote a user to administrator in a group or channel. Grants standard admin rights.",
        member_schema("The ID of the user to promote"),
        |client, arguments| async move {
            let args = ArgumentExtractor::new(&arguments);
            let chat_id = args.required_int64("chat_id")?;
            let user_id = args.required_int64("user_id")?;
            client.promote_admin(chat_id, user_id).await
        },
    )
}

pub fn demote_admin(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_demote_admin",
        "Demote an administrator back to a regular member.",
        member_schema("The ID of the admin to demote"),
        |client, arguments| async move {
            let args = ArgumentExtractor::new(&arguments);
            let chat_id = args.required_int64("chat_id")?;
            let user_id = args.required_int64("user_id")?;
            client.demote_admin(chat_id, user_id).await
        },
    )
}

pub fn ban_user(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_ban_user",
        "Ban a user from a group or channel. The user will be removed and cannot rejoin.",
        member_schema("The ID of the user to ban"),
        |client, arguments| async move {
            let args = ArgumentExtractor::new(&arguments);
            let chat_id = args.required_int64("chat_id")?;
            let user_id = args.required_int64("user_id")?;
            client.ban_user(chat_id, user_id).await
        },
    )
}

pub fn unban_user(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_unban_user",
        "Unban a previously banned user from a group or channel.",
        member_schema("The ID of the user to unban"),
        |client, arguments| async move {
            let args = ArgumentExtractor::new(&arguments);
            let chat_id = args.required_int64("chat_id")?;
            let user_id = args.required_int64("user_id")?;
            client.unban_user(chat_id, user_id).await
        },
    )
}
