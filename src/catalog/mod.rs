//! The fixed tool catalog.
//!
//! Six groups of tools, each built from the shared collaborator handle. A
//! handler validates its arguments, calls exactly one [`TelegramClient`]
//! operation and returns that operation's JSON text unchanged.
//!
//! [`TelegramClient`]: crate::client::TelegramClient

pub mod chat;
pub mod contact;
pub mod group;
pub mod message;
pub mod search;
pub mod user;

use std::future::Future;
use std::sync::Arc;

use crate::client::SharedClient;
use crate::error::Result;
use crate::tool::{ToolDefinition, ToolDescriptor};
use crate::value::{Arguments, Value};

/// Largest page size forwarded for chat and history listings.
pub const MAX_PAGE_SIZE: i32 = 100;
/// Default page size for chat and history listings.
pub const DEFAULT_PAGE_SIZE: i32 = 50;
/// Default result count for contact and message searches.
pub const DEFAULT_SEARCH_LIMIT: i32 = 20;
/// Default page size for member listings.
pub const DEFAULT_MEMBER_LIMIT: i32 = 200;

/// Every catalog tool name, in catalog order.
pub const TOOL_NAMES: [&str; 29] = [
    // chat
    "telegram_get_chats",
    "telegram_get_chat",
    "telegram_create_group",
    "telegram_create_channel",
    "telegram_leave_chat",
    "telegram_edit_chat_title",
    // message
    "telegram_get_chat_history",
    "telegram_get_message",
    "telegram_send_message",
    "telegram_reply_to_message",
    "telegram_edit_message",
    "telegram_forward_messages",
    "telegram_delete_messages",
    // contact
    "telegram_get_contacts",
    "telegram_search_contacts",
    "telegram_add_contact",
    "telegram_delete_contact",
    // user
    "telegram_get_me",
    "telegram_get_user",
    "telegram_block_user",
    "telegram_unblock_user",
    // group administration
    "telegram_get_chat_members",
    "telegram_add_chat_members",
    "telegram_promote_admin",
    "telegram_demote_admin",
    "telegram_ban_user",
    "telegram_unban_user",
    // search
    "telegram_search_messages",
    "telegram_search_public_chats",
];

/// Builds all 29 tool definitions against one collaborator.
pub fn all(client: &SharedClient) -> Vec<ToolDefinition> {
    let mut tools = Vec::with_capacity(TOOL_NAMES.len());
    tools.extend(chat::all(client));
    tools.extend(message::all(client));
    tools.extend(contact::all(client));
    tools.extend(user::all(client));
    tools.extend(group::all(client));
    tools.extend(search::all(client));
    tools
}

/// Binds a handler to its own handle on the collaborator.
fn bind<F, Fut>(
    client: &SharedClient,
    name: &str,
    description: &str,
    input_schema: Value,
    handler: F,
) -> ToolDefinition
where
    F: Fn(SharedClient, Arguments) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<String>> + Send + 'static,
{
    let client = Arc::clone(client);
    ToolDefinition::new(
        ToolDescriptor::new(name, description, input_schema),
        move |arguments| handler(Arc::clone(&client), arguments),
    )
}

/// Applies a default page size and caps it at [`MAX_PAGE_SIZE`].
fn page_size(requested: Option<i32>) -> i32 {
    requested.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE)
}


#[cfg(test)]
mod tests {
    use super::test_support::shared;
    use super::*;
    use crate::client::{InMemoryClient, MockTelegramClient, TelegramClient};
    use crate::config::TelegramConfig;
    use crate::error::TelegramError;
    use crate::tool::Tool;
    use std::collections::HashSet;

    /// A plausible value for a required argument, judged by its name.
    fn sample(name: &str) -> Value {
        if name.ends_with("_ids") {
            Value::Array(vec![Value::Int(1001)])
        } else if name.ends_with("_id") {
            Value::Int(1001)
        } else {
            Value::from("sample")
        }
    }

    #[test]
    fn test_catalog_matches_fixed_names() {
        let tools = all(&shared(MockTelegramClient::new()));
        let names: Vec<&str> = tools.iter().map(|tool| tool.name()).collect();
        assert_eq!(names, TOOL_NAMES);

        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(unique.len(), 29);
    }

    #[test]
    fn test_group_sizes() {
        let client = shared(MockTelegramClient::new());
        assert_eq!(chat::all(&client).len(), 6);
        assert_eq!(message::all(&client).len(), 7);
        assert_eq!(contact::all(&client).len(), 4);
        assert_eq!(user::all(&client).len(), 4);
        assert_eq!(group::all(&client).len(), 6);
        assert_eq!(search::all(&client).len(), 2);
    }

    #[test]
    fn test_every_schema_is_an_object_schema() {
        for tool in all(&shared(MockTelegramClient::new())) {
            let schema = tool.descriptor.input_schema.as_object().unwrap();
            assert_eq!(schema["type"].as_str(), Some("object"), "{}", tool.name());
            let properties = schema["properties"].as_object().unwrap();
            for required in tool.descriptor.required_arguments() {
                assert!(
                    properties.contains_key(required),
                    "{} requires undeclared {}",
                    tool.name(),
                    required
                );
            }
            assert!(!tool.descriptor.description.is_empty());
        }
    }

    #[tokio::test]
    async fn test_required_arguments_are_sufficient() {
        let client = InMemoryClient::demo(TelegramConfig::new(1, "hash"));
        client.initialize().await.unwrap();
        client.sign_in("+15550000", "12345").await.unwrap();
        let client: SharedClient = Arc::new(client);

        for tool in all(&client) {
            let arguments: Arguments = tool
                .descriptor
                .required_arguments()
                .into_iter()
                .map(|name| (name.to_string(), sample(name)))
                .collect();
            match tool.execute(arguments).await {
                Err(e @ TelegramError::MissingRequiredArgument(_))
                | Err(e @ TelegramError::InvalidArgumentType { .. }) => {
                    panic!("{} rejected its required arguments: {}", tool.name(), e)
                }
                _ => {}
            }
        }
    }

    #[test]
    fn test_page_size() {
        assert_eq!(page_size(None), 50);
        assert_eq!(page_size(Some(10)), 10);
        assert_eq!(page_size(Some(500)), 100);
    }
}
