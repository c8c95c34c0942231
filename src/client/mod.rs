//! The messaging-client collaborator.
//!
//! Tools never talk to the network themselves: each one forwards to exactly
//! one [`TelegramClient`] operation and returns its JSON text unchanged.

pub mod auth;
pub mod memory;
pub mod models;

pub use auth::{AuthListener, AuthState, AuthTracker};
pub use memory::InMemoryClient;
pub use models::{ChatInfo, ChatKind, MemberInfo, MemberRole, MessageBody, MessageInfo, Sender, UserInfo};

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;

/// Shared handle to the collaborator, injected into every catalog builder.
pub type SharedClient = Arc<dyn TelegramClient>;

/// Async API of the messaging account.
///
/// Every domain operation returns the result already rendered as JSON text
/// (see [`crate::json::encode`]) or a [`crate::TelegramError`] that callers
/// propagate unchanged.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TelegramClient: Send + Sync {
    /// Starts the client and its authorization flow.
    async fn initialize(&self) -> Result<()>;

    /// Closes the client. The authorization state becomes `Closed`.
    async fn close(&self);

    /// Current authorization state.
    fn auth_state(&self) -> AuthState;

    /// Installs the callback invoked on authorization state changes.
    fn set_auth_listener(&self, listener: AuthListener);

    async fn set_phone_number(&self, phone_number: &str) -> Result<()>;
    async fn set_authentication_code(&self, code: &str) -> Result<()>;
    /// Submits the two-step verification password.
    async fn set_password(&self, password: &str) -> Result<()>;

    // Chats
    async fn get_chats(&self, limit: i32) -> Result<String>;
    async fn get_chat(&self, chat_id: i64) -> Result<String>;
    async fn create_group(&self, title: &str, user_ids: &[i64]) -> Result<String>;
    async fn create_channel(&self, title: &str, description: &str, is_channel: bool) -> Result<String>;
    async fn leave_chat(&self, chat_id: i64) -> Result<String>;
    async fn edit_chat_title(&self, chat_id: i64, title: &str) -> Result<String>;

    // Messages
    async fn get_chat_history(&self, chat_id: i64, from_message_id: i64, limit: i32) -> Result<String>;
    async fn get_message(&self, chat_id: i64, message_id: i64) -> Result<String>;
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<String>;
    async fn reply_to_message(&self, chat_id: i64, message_id: i64, text: &str) -> Result<String>;
    async fn edit_message(&self, chat_id: i64, message_id: i64, text: &str) -> Result<String>;
    async fn forward_messages(&self, chat_id: i64, from_chat_id: i64, message_ids: &[i64]) -> Result<String>;
    async fn delete_messages(&self, chat_id: i64, message_ids: &[i64]) -> Result<String>;

    // Contacts
    async fn get_contacts(&self) -> Result<String>;
    async fn search_contacts(&self, query: &str, limit: i32) -> Result<String>;
    async fn add_contact(&self, phone_number: &str, first_name: &str, last_name: &str) -> Result<String>;
    async fn delete_contact(&self, user_id: i64) -> Result<String>;

    // Users
    async fn get_me(&self) -> Result<String>;
    async fn get_user(&self, user_id: i64) -> Result<String>;
    async fn block_user(&self, user_id: i64) -> Result<String>;
    async fn unblock_user(&self, user_id: i64) -> Result<String>;

    // Group administration
    async fn get_chat_members(&self, chat_id: i64, limit: i32) -> Result<String>;
    async fn add_chat_members(&self, chat_id: i64, user_ids: &[i64]) -> Result<String>;
    async fn promote_admin(&self, chat_id: i64, user_id: i64) -> Result<String>;
    async fn demote_admin(&self, chat_id: i64, user_id: i64) -> Result<String>;
    async fn ban_user(&self, chat_id: i64, user_id: i64) -> Result<String>;
    async fn unban_user(&self, chat_id: i64, user_id: i64) -> Result<String>;

    // Search
    async fn search_messages(&self, chat_id: i64, query: &str, limit: i32) -> Result<String>;
    async fn search_public_chats(&self, query: &str) -> Result<String>;
}
