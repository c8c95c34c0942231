//! Contact tools.

use super::{bind, DEFAULT_SEARCH_LIMIT};
use crate::client::SharedClient;
use crate::extractor::ArgumentExtractor;
use crate::tool::{integer_property, object_schema, string_property, ToolDefinition};

pub fn all(client: &SharedClient) -> Vec<ToolDefinition> {
    vec![
        get_contacts(client),
        search_contacts(client),
        add_contact(client),
        delete_contact(client),
    ]
}

pub fn get_contacts(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_get_contacts",
        "Get the list of all contacts. Returns user details for each contact.",
        object_schema([], &[]),
        |client, _arguments| async move { client.get_contacts().await },
    )
}

pub fn search_contacts(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_search_contacts",
        "Search for contacts by name or username.",
        object_schema(
            [
                ("query", string_property("The search query string")),
                (
                    "limit",
                    integer_property("Maximum number of results to return (default 20)"),
                ),
            ],
            &["query"],
        ),
        |client, arguments| async move {
            let args = ArgumentExtractor::new(&arguments);
            let query = args.required_string("query")?;
            let limit = args.optional_int("limit").unwrap_or(DEFAULT_SEARCH_LIMIT);
            client.search_contacts(&query, limit).await
        },
    )
}

pub fn add_contact(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_add_contact",
        "Add a new contact with phone number and name.",
        object_schema(
            [
                (
                    "phone_number",
                    string_property("Phone number of the contact (international format)"),
                ),
                ("first_name", string_property("First name of the contact")),
                (
                    "last_name",
                    string_property("Last name of the contact (optional)"),
                ),
            ],
            &["phone_number", "first_name"],
        ),
        |client, arguments| async move {
            let args = ArgumentExtractor::new(&arguments);
            let phone_number = args.required_string("phone_number")?;
            let first_name = args.required_string("first_name")?;
            let last_name = args.optional_string("last_name").unwrap_or_default();
            client
                .add_contact(&phone_number, &first_name, &last_name)
                .await
        },
    )
}

pub fn delete_contact(client: &SharedClient) -> ToolDefinition {
    bind(
        client,
        "telegram_delete_contact",
        "Remove a user from the contact list.",
        object_schema(
            [(
                "user_id",
                integer_property("The ID of the user to remove from contacts"),
            )],
            &["user_id"],
        ),
        |client, arguments| async move {
            let user_id = ArgumentExtractor::new(&arguments).required_int64("user_id")?;
            client.delete_contact(user_id).await
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
    async fn test_get_contacts_ignores_arguments() {
        let mut mock = MockTelegramClient::new();
        mock.expect_get_contacts()
            .times(1)
            .returning(|| Ok(r#"{"contacts":[],"total_count":0}"#.to_string()));
        let tools = all(&shared(mock));

        let result = call(&tools, "telegram_get_contacts", json!({"unused": 1}))
            .await
            .unwrap();
        assert_eq!(result, r#"{"contacts":[],"total_count":0}"#);
    }

    #[tokio::test]
    async fn test_search_contacts_default_limit() {
        let mut mock = MockTelegramClient::new();
        mock.expect_search_contacts()
            .withf(|query, limit| query == "ann" && *limit == 20)
            .times(1)
            .returning(|_, _| Ok("{}".to_string()));
        let tools = all(&shared(mock));

        call(&tools, "telegram_search_contacts", json!({"query": "ann"}))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_add_contact_last_name_optional() {
        let mut mock = MockTelegramClient::new();
        mock.expect_add_contact()
            .withf(|phone, first, last| phone == "+15550100" && first == "Ann" && last.is_empty())
            .times(1)
            .returning(|_, _, _| Ok("{}".to_string()));
        let tools = all(&shared(mock));

        call(
            &tools,
            "telegram_add_contact",
            json!({"phone_number": "+15550100", "first_name": "Ann"}),
        )
        .await
        .unwrap();

        assert_eq!(
            call(
                &tools,
                "telegram_add_contact",
                json!({"phone_number": 15550100, "first_name": "Ann"})
            )
            .await
            .unwrap_err(),
            TelegramError::invalid_type("phone_number", "string", "integer")
        );
    }
}
