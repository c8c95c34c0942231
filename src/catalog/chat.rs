//! Chat tools.

use super::{bind, page_size};
use crate::client::SharedClient;
use crate::extractor::ArgumentExtractor;
use crate::tool::{
    array_property, boolean_property, integer_property, object_schema, string_property,
    ToolDefinition,
};

pub fn all(client: &SharedClient) -> Vec<ToolDefinition> {
    vec![
        get_chats(client),
        get_chat(client),
        create_group(client),
        create_channel(client),
        leave_chat(client),
        edit_chat_title(client),
    ]
}

pub fn get_chats(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_get_chats",
        "Get the list of chats. Returns chat ID, title, type, and unread count.",
        object_schema(
            [(
                "limit",
                integer_property("Maximum number of chats to return (default 50, max 100)"),
            )],
            &[],
        ),
        |client, arguments| async move {
            let limit = page_size(ArgumentExtractor::new(&arguments).optional_int("limit"));
            client.get_chats(limit).await
        },
    )
}

pub fn get_chat(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_get_chat",
        "Get detailed information about a specific chat by its ID.",
        object_schema(
            [("chat_id", integer_property("The unique identifier of the chat"))],
            &["chat_id"],
        ),
        |client, arguments| async move {
            let chat_id = ArgumentExtractor::new(&arguments).required_int64("chat_id")?;
            client.get_chat(chat_id).await
        },
    )
}

pub fn create_group(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_create_group",
        "Create a new basic group chat with specified users.",
        object_schema(
            [
                ("title", string_property("The title of the new group")),
                (
                    "user_ids",
                    array_property("Array of user IDs to add to the group", "integer"),
                ),
            ],
            &["title", "user_ids"],
        ),
        |client, arguments| async move {
            let args = ArgumentExtractor::new(&arguments);
            let title = args.required_string("title")?;
            let user_ids = args.required_int64_array("user_ids")?;
            client.create_group(&title, &user_ids).await
        },
    )
}

pub fn create_channel(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_create_channel",
        "Create a new channel or supergroup.",
        object_schema(
            [
                ("title", string_property("The title of the channel")),
                ("description", string_property("Description of the channel")),
                (
                    "is_channel",
                    boolean_property("True for channel, false for supergroup (default true)"),
                ),
            ],
            &["title"],
        ),
        |client, arguments| async move {
            let args = ArgumentExtractor::new(&arguments);
            let title = args.required_string("title")?;
            let description = args.optional_string("description").unwrap_or_default();
            let is_channel = args.optional_bool("is_channel").unwrap_or(true);
            client.create_channel(&title, &description, is_channel).await
        },
    )
}

pub fn leave_chat(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_leave_chat",
        "Leave a group or channel.",
        object_schema(
            [(
                "chat_id",
                integer_property("The unique identifier of the chat to leave"),
            )],
            &["chat_id"],
        ),
        |client, arguments| async move {
            let chat_id = ArgumentExtractor::new(&arguments).required_int64("chat_id")?;
            client.leave_chat(chat_id).await
        },
    )
}

pub fn edit_chat_title(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_edit_chat_title",
        "Edit the title of a chat.",
        object_schema(
            [
                ("chat_id", integer_property("The unique identifier of the chat")),
                ("title", string_property("The new title for the chat")),
            ],
            &["chat_id", "title"],
        ),
        |client, arguments| async move {
            let args = ArgumentExtractor::new(&arguments);
            let chat_id = args.required_int64("chat_id")?;
            let title = args.required_string("title")?;
            client.edit_chat_title(chat_id, &title).await
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::{call, shared};
    use crate::client::MockTelegramClient;
    use crate::error::TelegramError;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_chats_defaults_and_clamps_limit() {
        let mut mock = MockTelegramClient::new();
        mock.expect_get_chats()
            .withf(|limit| *limit == 50)
            .times(1)
            .returning(|_| Ok(r#"{"chats":[],"total_count":0}"#.to_string()));
        mock.expect_get_chats()
            .withf(|limit| *limit == 100)
            .times(1)
            .returning(|_| Ok("clamped".to_string()));
        let tools = all(&shared(mock));

        assert_eq!(
            call(&tools, "telegram_get_chats", json!({})).await.unwrap(),
            r#"{"chats":[],"total_count":0}"#
        );
        assert_eq!(
            call(&tools, "telegram_get_chats", json!({"limit": 500})).await.unwrap(),
            "clamped"
        );
    }

    #[tokio::test]
    async fn test_get_chat_accepts_numeric_string_id() {
        let mut mock = MockTelegramClient::new();
        mock.expect_get_chat()
            .withf(|chat_id| *chat_id == -1001234567890)
            .times(1)
            .returning(|_| Ok("{}".to_string()));
        let tools = all(&shared(mock));

        call(&tools, "telegram_get_chat", json!({"chat_id": "-1001234567890"}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_get_chat_requires_id() {
        let tools = all(&shared(MockTelegramClient::new()));
        assert_eq!(
            call(&tools, "telegram_get_chat", json!({})).await.unwrap_err(),
            TelegramError::MissingRequiredArgument("chat_id".into())
        );
        assert_eq!(
            call(&tools, "telegram_get_chat", json!({"chat_id": true}))
                .await
                .unwrap_err(),
            TelegramError::invalid_type("chat_id", "integer (int64)", "boolean")
        );
    }

    #[tokio::test]
    async fn test_create_group_drops_bad_ids() {
        let mut mock = MockTelegramClient::new();
        mock.expect_create_group()
            .withf(|title, user_ids| title == "Team" && user_ids.to_vec() == vec![1, 3])
            .times(1)
            .returning(|_, _| Ok(r#"{"chat_id":-5,"success":true}"#.to_string()));
        let tools = all(&shared(mock));

        let result = call(
            &tools,
            "telegram_create_group",
            json!({"title": "Team", "user_ids": [1, "x", "3"]}),
        )
        .await
        .unwrap();
        assert_eq!(result, r#"{"chat_id":-5,"success":true}"#);
    }

    #[tokio::test]
    async fn test_create_channel_defaults() {
        let mut mock = MockTelegramClient::new();
        mock.expect_create_channel()
            .withf(|title, description, is_channel| {
                title == "News" && description.is_empty() && *is_channel
            })
            .times(1)
            .returning(|_, _, _| Ok("{}".to_string()));
        let tools = all(&shared(mock));

        call(&tools, "telegram_create_channel", json!({"title": "News"}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_collaborator_errors_pass_through() {
        let mut mock = MockTelegramClient::new();
        mock.expect_leave_chat()
            .returning(|chat_id| Err(TelegramError::ChatNotFound(chat_id)));
        let tools = all(&shared(mock));

        assert_eq!(
            call(&tools, "telegram_leave_chat", json!({"chat_id": 9})).await.unwrap_err(),
            TelegramError::ChatNotFound(9)
        );
    }
}
