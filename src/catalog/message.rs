//! Message tools.

use super::{bind, page_size};
use crate::client::SharedClient;
use crate::extractor::ArgumentExtractor;
use crate::tool::{array_property, integer_property, object_schema, string_property, ToolDefinition};

pub fn all(client: &SharedClient) -> Vec<ToolDefinition> {
    vec![
        get_chat_history(client),
        get_message(client),
        send_message(client),
        reply_to_message(client),
        edit_message(client),
        forward_messages(client),
        delete_messages(client),
    ]
}

pub fn get_chat_history(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_get_chat_history",
        "Get message history from a chat. Returns messages in reverse chronological order.",
        object_schema(
            [
                ("chat_id", integer_property("The chat to get messages from")),
                (
                    "from_message_id",
                    integer_property("Message ID to start from (0 for most recent)"),
                ),
                (
                    "limit",
                    integer_property("Maximum number of messages to return (default 50, max 100)"),
                ),
            ],
            &["chat_id"],
        ),
        |client, arguments| async move {
            let args = ArgumentExtractor::new(&arguments);
            let chat_id = args.required_int64("chat_id")?;
            let from_message_id = args.optional_int64("from_message_id").unwrap_or(0);
            let limit = page_size(args.optional_int("limit"));
            client.get_chat_history(chat_id, from_message_id, limit).await
        },
    )
}

pub fn get_message(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_get_message",
        "Get a single message by its ID from a chat.",
        object_schema(
            [
                ("chat_id", integer_property("The chat containing the message")),
                ("message_id", integer_property("The ID of the message to retrieve")),
            ],
            &["chat_id", "message_id"],
        ),
        |client, arguments| async move {
            let args = ArgumentExtractor::new(&arguments);
            let chat_id = args.required_int64("chat_id")?;
            let message_id = args.required_int64("message_id")?;
            client.get_message(chat_id, message_id).await
        },
    )
}

pub fn send_message(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_send_message",
        "Send a text message to a chat.",
        object_schema(
            [
                ("chat_id", integer_property("The chat to send the message to")),
                ("text", string_property("The text content of the message")),
            ],
            &["chat_id", "text"],
        ),
        |client, arguments| async move {
            let args = ArgumentExtractor::new(&arguments);
            let chat_id = args.required_int64("chat_id")?;
            let text = args.required_string("text")?;
            client.send_message(chat_id, &text).await
        },
    )
}

pub fn reply_to_message(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_reply_to_message",
        "Reply to a specific message in a chat.",
        object_schema(
            [
                ("chat_id", integer_property("The chat containing the message")),
                ("message_id", integer_property("The ID of the message to reply to")),
                ("text", string_property("The reply text")),
            ],
            &["chat_id", "message_id", "text"],
        ),
        |client, arguments| async move {
            let args = ArgumentExtractor::new(&arguments);
            let chat_id = args.required_int64("chat_id")?;
            let message_id = args.required_int64("message_id")?;
            let text = args.required_string("text")?;
            client.reply_to_message(chat_id, message_id, &text).await
        },
    )
}

pub fn edit_message(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_edit_message",
        "Edit an existing text message.",
        object_schema(
            [
                ("chat_id", integer_property("The chat containing the message")),
                ("message_id", integer_property("The ID of the message to edit")),
                ("text", string_property("The new text content")),
            ],
            &["chat_id", "message_id", "text"],
        ),
        |client, arguments| async move {
            let args = ArgumentExtractor::new(&arguments);
            let chat_id = args.required_int64("chat_id")?;
            let message_id = args.required_int64("message_id")?;
            let text = args.required_string("text")?;
            client.edit_message(chat_id, message_id, &text).await
        },
    )
}

pub fn forward_messages(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_forward_messages",
        "Forward messages from one chat to another.",
        object_schema(
            [
                ("chat_id", integer_property("The target chat to forward messages to")),
                (
                    "from_chat_id",
                    integer_property("The source chat containing the messages"),
                ),
                (
                    "message_ids",
                    array_property("Array of message IDs to forward", "integer"),
                ),
            ],
            &["chat_id", "from_chat_id", "message_ids"],
        ),
        |client, arguments| async move {
            let args = ArgumentExtractor::new(&arguments);
            let chat_id = args.required_int64("chat_id")?;
            let from_chat_id = args.required_int64("from_chat_id")?;
            let message_ids = args.required_int64_array("message_ids")?;
            client
                .forward_messages(chat_id, from_chat_id, &message_ids)
                .await
        },
    )
}

pub fn delete_messages(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_delete_messages",
        "Delete messages from a chat. Deletes for all participants when possible.",
        object_schema(
            [
                ("chat_id", integer_property("The chat containing the messages")),
                (
                    "message_ids",
                    array_property("Array of message IDs to delete", "integer"),
                ),
            ],
            &["chat_id", "message_ids"],
        ),
        |client, arguments| async move {
            let args = ArgumentExtractor::new(&arguments);
            let chat_id = args.required_int64("chat_id")?;
            let message_ids = args.required_int64_array("message_ids")?;
            client.delete_messages(chat_id, &message_ids).await
        },
    )
}
