//! An in-process account backend.
//!
//! `InMemoryClient` keeps users, contacts, chats and messages in memory and
//! answers every collaborator operation with the same result shapes as a
//! live account. It runs the full authorization state machine, so tools
//! behave exactly as they would against the network: calls fail with
//! `ClientNotInitialized` before `initialize` and `NotAuthorized` until the
//! login completes.

use async_trait::async_trait;
use chrono::Utc;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use crate::client::{
    AuthListener, AuthState, AuthTracker, ChatInfo, ChatKind, MemberInfo, MemberRole,
    MessageBody, MessageInfo, Sender, TelegramClient, UserInfo,
};
use crate::config::TelegramConfig;
use crate::error::{Result, TelegramError};
use crate::json;
use crate::value::{ResultMap, Value};

static PHONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("phone pattern is valid"));

const CHANNEL_ID_BASE: i64 = -1_000_000_000_000;

fn encode<const N: usize>(fields: [(&str, Value); N]) -> String {
    let map: ResultMap = fields
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();
    json::encode(&map)
}

fn now() -> i32 {
    i32::try_from(Utc::now().timestamp()).unwrap_or(i32::MAX)
}

fn normalize_phone(phone_number: &str) -> Result<String> {
    let digits: String = phone_number
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect();
    if PHONE_NUMBER.is_match(&digits) {
        Ok(digits)
    } else {
        Err(TelegramError::invalid_argument(
            "phone_number",
            "expected an international phone number",
        ))
    }
}

#[derive(Debug)]
struct ChatRecord {
    info: ChatInfo,
    description: String,
    members: BTreeMap<i64, MemberInfo>,
    messages: BTreeMap<i64, MessageInfo>,
}

impl ChatRecord {
    fn new(info: ChatInfo) -> Self {
        Self {
            info,
            description: String::new(),
            members: BTreeMap::new(),
            messages: BTreeMap::new(),
        }
    }

    fn set_role(&mut self, user_id: i64, role: MemberRole) {
        self.members
            .entry(user_id)
            .and_modify(|member| member.role = role)
            .or_insert(MemberInfo {
                member: Sender::User(user_id),
                role,
                joined_date: now(),
            });
    }

    fn active_members(&self) -> Vec<Value> {
        self.members
            .values()
            .filter(|member| !matches!(member.role, MemberRole::Left | MemberRole::Banned))
            .map(MemberInfo::to_value)
            .collect()
    }

    /// Chat info with the member count of groups filled in.
    fn snapshot(&self) -> ChatInfo {
        let mut info = self.info.clone();
        if info.kind.is_group() {
            let active = self
                .members
                .values()
                .filter(|member| !matches!(member.role, MemberRole::Left | MemberRole::Banned))
                .count();
            info.member_count = Some(i32::try_from(active).unwrap_or(i32::MAX));
        }
        info
    }

    /// Messages newest first.
    fn history(&self) -> impl Iterator<Item = &MessageInfo> {
        self.messages.values().rev()
    }
}

#[derive(Debug)]
struct Store {
    initialized: bool,
    me: i64,
    users: BTreeMap<i64, UserInfo>,
    contacts: BTreeSet<i64>,
    blocked: BTreeSet<i64>,
    chats: BTreeMap<i64, ChatRecord>,
    next_user_id: i64,
    next_group_id: i64,
    next_message_id: i64,
}

impl Store {
    fn chat(&self, chat_id: i64) -> Result<&ChatRecord> {
        self.chats
            .get(&chat_id)
            .ok_or(TelegramError::ChatNotFound(chat_id))
    }

    fn chat_mut(&mut self, chat_id: i64) -> Result<&mut ChatRecord> {
        self.chats
            .get_mut(&chat_id)
            .ok_or(TelegramError::ChatNotFound(chat_id))
    }

    fn group_mut(&mut self, chat_id: i64) -> Result<&mut ChatRecord> {
        let chat = self.chat_mut(chat_id)?;
        if chat.info.kind.is_group() {
            Ok(chat)
        } else {
            Err(TelegramError::Backend {
                code: 400,
                message: "Chat is not a group".to_string(),
            })
        }
    }

    /// Next free chat id below `base`.
    fn allocate_chat_id(&mut self, base: i64) -> i64 {
        loop {
            let id = base - self.next_group_id;
            self.next_group_id += 1;
            if !self.chats.contains_key(&id) {
                return id;
            }
        }
    }

    fn user(&self, user_id: i64) -> Result<&UserInfo> {
        self.users
            .get(&user_id)
            .ok_or(TelegramError::UserNotFound(user_id))
    }

    fn ensure_users(&self, user_ids: &[i64]) -> Result<()> {
        user_ids.iter().try_for_each(|id| self.user(*id).map(|_| ()))
    }

    fn post(&mut self, chat_id: i64, sender: Sender, body: MessageBody) -> Result<MessageInfo> {
        let id = self.next_message_id;
        let is_outgoing = sender == Sender::User(self.me);
        let chat = self.chat_mut(chat_id)?;
        let message = MessageInfo {
            id,
            chat_id,
            sender,
            date: now(),
            is_outgoing,
            body,
        };
        chat.messages.insert(id, message.clone());
        chat.info.last_message_date = Some(Utc::now());
        if !is_outgoing {
            chat.info.unread_count += 1;
        }
        self.next_message_id += 1;
        Ok(message)
    }

    fn users_value(&self, ids: impl Iterator<Item = i64>) -> Vec<Value> {
        ids.filter_map(|id| self.users.get(&id))
            .map(UserInfo::to_value)
            .collect()
    }
}

/// In-memory implementation of [`TelegramClient`].
#[derive(Debug)]
pub struct InMemoryClient {
    config: TelegramConfig,
    password: Option<String>,
    auth: AuthTracker,
    store: Mutex<Store>,
}

impl InMemoryClient {
    /// Creates an empty account whose own user is `me`.
    pub fn new(config: TelegramConfig, me: UserInfo) -> Self {
        let me_id = me.id;
        let mut users = BTreeMap::new();
        users.insert(me.id, me);
        Self {
            config,
            password: None,
            auth: AuthTracker::new(),
            store: Mutex::new(Store {
                initialized: false,
                me: me_id,
                users,
                contacts: BTreeSet::new(),
                blocked: BTreeSet::new(),
                chats: BTreeMap::new(),
                next_user_id: me_id + 1_000,
                next_group_id: 1,
                next_message_id: 1,
            }),
        }
    }

    /// Requires a two-step verification password after the login code.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Adds a known user, optionally as a contact.
    pub fn with_user(mut self, user: UserInfo, is_contact: bool) -> Self {
        let store = self.store.get_mut();
        store.next_user_id = store.next_user_id.max(user.id + 1);
        if is_contact {
            store.contacts.insert(user.id);
        }
        store.users.insert(user.id, user);
        self
    }

    /// Adds a chat. The account owner becomes its creator.
    pub fn with_chat(mut self, info: ChatInfo, member_ids: &[i64]) -> Self {
        let store = self.store.get_mut();
        let mut chat = ChatRecord::new(info);
        if chat.info.kind.is_group() {
            chat.set_role(store.me, MemberRole::Creator);
            for id in member_ids {
                chat.set_role(*id, MemberRole::Member);
            }
        }
        store.chats.insert(chat.info.id, chat);
        self
    }

    /// Adds a message to an existing chat.
    pub fn with_message(mut self, chat_id: i64, sender: Sender, body: MessageBody) -> Self {
        // Seeding an unknown chat is a no-op.
        let _ = self.store.get_mut().post(chat_id, sender, body);
        self
    }

    /// A small seeded account used by the command line and tests.
    pub fn demo(config: TelegramConfig) -> Self {
        let user = |id: i64, first: &str, last: &str, username: Option<&str>, phone: &str| UserInfo {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            username: username.map(str::to_string),
            phone_number: phone.to_string(),
            is_bot: false,
            is_premium: false,
        };
        let chat = |id: i64, title: &str, kind: ChatKind| ChatInfo {
            id,
            title: title.to_string(),
            kind,
            unread_count: 0,
            last_read_inbox_message_id: 0,
            last_read_outbox_message_id: 0,
            member_count: None,
            last_message_date: None,
        };
        let mut news_bot = user(1004, "News", "Bot", Some("rust_news_bot"), "");
        news_bot.is_bot = true;

        Self::new(config, user(1000, "Demo", "User", Some("demo"), "+15550000"))
            .with_user(user(1001, "Alice", "Smith", Some("alice"), "+15550001"), true)
            .with_user(user(1002, "Bob", "Jones", None, "+15550002"), true)
            .with_user(user(1003, "Carol", "White", Some("carol"), ""), false)
            .with_user(news_bot, false)
            .with_chat(chat(1001, "Alice Smith", ChatKind::Private), &[])
            .with_chat(chat(-1, "Weekend Hike", ChatKind::BasicGroup), &[1001, 1002])
            .with_chat(chat(CHANNEL_ID_BASE - 1, "Rust News", ChatKind::Channel), &[1004])
            .with_chat(chat(CHANNEL_ID_BASE - 2, "Rust Beginners", ChatKind::Supergroup), &[1001, 1003])
            .with_message(1001, Sender::User(1001), MessageBody::Text("Are we still on for Saturday?".into()))
            .with_message(1001, Sender::User(1000), MessageBody::Text("Yes, meet at the trailhead".into()))
            .with_message(-1, Sender::User(1002), MessageBody::Photo { caption: "Trail map".into() })
            .with_message(
                CHANNEL_ID_BASE - 1,
                Sender::Chat(CHANNEL_ID_BASE - 1),
                MessageBody::Text("Rust 1.85 released with the 2024 edition".into()),
            )
            .with_message(
                CHANNEL_ID_BASE - 2,
                Sender::User(1003),
                MessageBody::Text("How do I share state between tokio tasks?".into()),
            )
    }

    /// Runs the phone/code login. Fails if a password is still required.
    pub async fn sign_in(&self, phone_number: &str, code: &str) -> Result<()> {
        self.set_phone_number(phone_number).await?;
        self.set_authentication_code(code).await?;
        if self.auth.is_ready() {
            Ok(())
        } else {
            Err(TelegramError::AuthorizationFailed(
                "two-step verification password required".to_string(),
            ))
        }
    }

    /// The authorization tracker, for observing transitions.
    pub fn auth(&self) -> &AuthTracker {
        &self.auth
    }

    async fn initialized(&self) -> Result<MutexGuard<'_, Store>> {
        let store = self.store.lock().await;
        if store.initialized {
            Ok(store)
        } else {
            Err(TelegramError::ClientNotInitialized)
        }
    }

    /// Locks the account for a domain operation.
    async fn account(&self) -> Result<MutexGuard<'_, Store>> {
        let store = self.initialized().await?;
        if self.auth.is_ready() {
            Ok(store)
        } else {
            Err(TelegramError::NotAuthorized)
        }
    }

    /// Locks the account for one login step. The guard must be held until
    /// the step's transition so `close` cannot interleave.
    async fn expect_state(&self, expected: AuthState, step: &str) -> Result<MutexGuard<'_, Store>> {
        let store = self.initialized().await?;
        let current = self.auth.current();
        if current == expected {
            Ok(store)
        } else {
            Err(TelegramError::AuthorizationFailed(format!(
                "unexpected {} in state {:?}",
                step, current
            )))
        }
    }

    async fn set_member_role(
        &self,
        chat_id: i64,
        user_id: i64,
        role: MemberRole,
    ) -> Result<()> {
        let mut store = self.account().await?;
        store.user(user_id)?;
        store.group_mut(chat_id)?.set_role(user_id, role);
        debug!("Set role of {} in {} to {}", user_id, chat_id, role.as_str());
        Ok(())
    }
}

#[async_trait]
impl TelegramClient for InMemoryClient {
    async fn initialize(&self) -> Result<()> {
        self.config.validate()?;
        let mut store = self.store.lock().await;
        if !matches!(self.auth.current(), AuthState::Unknown | AuthState::Closed) {
            debug!("Client already initialized in state {:?}", self.auth.current());
            return Ok(());
        }
        store.initialized = true;
        self.auth.transition(AuthState::WaitingParameters);
        info!(
            "Client initialized (device: {}, database: {})",
            self.config.device_model, self.config.database_directory
        );
        self.auth.transition(AuthState::WaitingPhoneNumber);
        Ok(())
    }

    async fn close(&self) {
        let mut store = self.store.lock().await;
        store.initialized = false;
        self.auth.transition(AuthState::Closed);
    }

    fn auth_state(&self) -> AuthState {
        self.auth.current()
    }

    fn set_auth_listener(&self, listener: AuthListener) {
        self.auth.set_listener(listener);
    }

    async fn set_phone_number(&self, phone_number: &str) -> Result<()> {
        let _store = self.expect_state(AuthState::WaitingPhoneNumber, "phone number").await?;
        normalize_phone(phone_number)?;
        self.auth.transition(AuthState::WaitingCode);
        Ok(())
    }

    async fn set_authentication_code(&self, code: &str) -> Result<()> {
        let _store = self.expect_state(AuthState::WaitingCode, "authentication code").await?;
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(TelegramError::AuthorizationFailed("PHONE_CODE_INVALID".to_string()));
        }
        let next = if self.password.is_some() {
            AuthState::WaitingPassword
        } else {
            AuthState::Ready
        };
        self.auth.transition(next);
        Ok(())
    }

    async fn set_password(&self, password: &str) -> Result<()> {
        let _store = self.expect_state(AuthState::WaitingPassword, "password").await?;
        if self.password.as_deref() != Some(password) {
            return Err(TelegramError::AuthorizationFailed("PASSWORD_HASH_INVALID".to_string()));
        }
        self.auth.transition(AuthState::Ready);
        Ok(())
    }

    async fn get_chats(&self, limit: i32) -> Result<String> {
        let store = self.account().await?;
        let mut chats: Vec<&ChatRecord> = store.chats.values().collect();
        chats.sort_by(|a, b| {
            b.info
                .last_message_date
                .cmp(&a.info.last_message_date)
                .then(a.info.id.cmp(&b.info.id))
        });
        let chats: Vec<Value> = chats
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(0))
            .map(|chat| Value::Object(chat.snapshot().to_summary()))
            .collect();
        let total = chats.len();
        Ok(encode([("chats", Value::Array(chats)), ("total_count", total.into())]))
    }

    async fn get_chat(&self, chat_id: i64) -> Result<String> {
        let store = self.account().await?;
        Ok(json::encode(&object_of(store.chat(chat_id)?.snapshot().to_value())))
    }

    async fn create_group(&self, title: &str, user_ids: &[i64]) -> Result<String> {
        let mut store = self.account().await?;
        store.ensure_users(user_ids)?;
        let chat_id = store.allocate_chat_id(0);

        let mut chat = ChatRecord::new(ChatInfo {
            id: chat_id,
            title: title.to_string(),
            kind: ChatKind::BasicGroup,
            unread_count: 0,
            last_read_inbox_message_id: 0,
            last_read_outbox_message_id: 0,
            member_count: None,
            last_message_date: None,
        });
        chat.set_role(store.me, MemberRole::Creator);
        for id in user_ids {
            chat.set_role(*id, MemberRole::Member);
        }
        store.chats.insert(chat_id, chat);
        info!("Created group {} ({})", title, chat_id);
        Ok(encode([("chat_id", chat_id.into()), ("success", true.into())]))
    }

    async fn create_channel(&self, title: &str, description: &str, is_channel: bool) -> Result<String> {
        let mut store = self.account().await?;
        let chat_id = store.allocate_chat_id(CHANNEL_ID_BASE);

        let mut chat = ChatRecord::new(ChatInfo {
            id: chat_id,
            title: title.to_string(),
            kind: if is_channel {
                ChatKind::Channel
            } else {
                ChatKind::Supergroup
            },
            unread_count: 0,
            last_read_inbox_message_id: 0,
            last_read_outbox_message_id: 0,
            member_count: None,
            last_message_date: None,
        });
        chat.description = description.to_string();
        chat.set_role(store.me, MemberRole::Creator);
        store.chats.insert(chat_id, chat);
        info!("Created {} {} ({})", if is_channel { "channel" } else { "supergroup" }, title, chat_id);
        Ok(encode([("chat_id", chat_id.into()), ("title", title.into())]))
    }

    async fn leave_chat(&self, chat_id: i64) -> Result<String> {
        let mut store = self.account().await?;
        store.chats.remove(&chat_id).ok_or(TelegramError::ChatNotFound(chat_id))?;
        Ok(encode([("success", true.into()), ("chat_id", chat_id.into())]))
    }

    async fn edit_chat_title(&self, chat_id: i64, title: &str) -> Result<String> {
        let mut store = self.account().await?;
        store.group_mut(chat_id)?.info.title = title.to_string();
        Ok(encode([
            ("success", true.into()),
            ("chat_id", chat_id.into()),
            ("title", title.into()),
        ]))
    }

    async fn get_chat_history(&self, chat_id: i64, from_message_id: i64, limit: i32) -> Result<String> {
        let store = self.account().await?;
        let messages: Vec<Value> = store
            .chat(chat_id)?
            .history()
            .filter(|message| from_message_id == 0 || message.id <= from_message_id)
            .take(usize::try_from(limit).unwrap_or(0))
            .map(MessageInfo::to_value)
            .collect();
        let total = messages.len();
        Ok(encode([("messages", Value::Array(messages)), ("total_count", total.into())]))
    }

    async fn get_message(&self, chat_id: i64, message_id: i64) -> Result<String> {
        let store = self.account().await?;
        let message = store
            .chat(chat_id)?
            .messages
            .get(&message_id)
            .ok_or(TelegramError::MessageNotFound(message_id))?;
        Ok(json::encode(&object_of(message.to_value())))
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<String> {
        let mut store = self.account().await?;
        let me = Sender::User(store.me);
        let message = store.post(chat_id, me, MessageBody::Text(text.to_string()))?;
        Ok(json::encode(&object_of(message.to_value())))
    }

    async fn reply_to_message(&self, chat_id: i64, message_id: i64, text: &str) -> Result<String> {
        let mut store = self.account().await?;
        if !store.chat(chat_id)?.messages.contains_key(&message_id) {
            return Err(TelegramError::MessageNotFound(message_id));
        }
        let me = Sender::User(store.me);
        let message = store.post(chat_id, me, MessageBody::Text(text.to_string()))?;
        Ok(json::encode(&object_of(message.to_value())))
    }

    async fn edit_message(&self, chat_id: i64, message_id: i64, text: &str) -> Result<String> {
        let mut store = self.account().await?;
        let message = store
            .chat_mut(chat_id)?
            .messages
            .get_mut(&message_id)
            .ok_or(TelegramError::MessageNotFound(message_id))?;
        if !message.is_outgoing || !matches!(message.body, MessageBody::Text(_)) {
            return Err(TelegramError::Backend {
                code: 400,
                message: "Message can't be edited".to_string(),
            });
        }
        message.body = MessageBody::Text(text.to_string());
        Ok(json::encode(&object_of(message.to_value())))
    }

    async fn forward_messages(&self, chat_id: i64, from_chat_id: i64, message_ids: &[i64]) -> Result<String> {
        let mut store = self.account().await?;
        store.chat(chat_id)?;
        let bodies: Vec<MessageBody> = {
            let source = store.chat(from_chat_id)?;
            message_ids
                .iter()
                .filter_map(|id| source.messages.get(id))
                .map(|message| message.body.clone())
                .collect()
        };
        let me = Sender::User(store.me);
        let mut forwarded = Vec::with_capacity(bodies.len());
        for body in bodies {
            forwarded.push(store.post(chat_id, me, body)?.to_value());
        }
        let count = forwarded.len();
        Ok(encode([("messages", Value::Array(forwarded)), ("count", count.into())]))
    }

    async fn delete_messages(&self, chat_id: i64, message_ids: &[i64]) -> Result<String> {
        let mut store = self.account().await?;
        let chat = store.chat_mut(chat_id)?;
        for id in message_ids {
            chat.messages.remove(id);
        }
        Ok(encode([
            ("success", true.into()),
            ("deleted_count", message_ids.len().into()),
        ]))
    }

    async fn get_contacts(&self) -> Result<String> {
        let store = self.account().await?;
        let contacts = store.users_value(store.contacts.iter().copied());
        let total = contacts.len();
        Ok(encode([("contacts", Value::Array(contacts)), ("total_count", total.into())]))
    }

    async fn search_contacts(&self, query: &str, limit: i32) -> Result<String> {
        let store = self.account().await?;
        let needle = query.to_lowercase();
        let matches = store.contacts.iter().copied().filter(|id| {
            store.users.get(id).is_some_and(|user| {
                user.full_name().to_lowercase().contains(&needle)
                    || user
                        .username
                        .as_deref()
                        .is_some_and(|name| name.to_lowercase().contains(&needle))
            })
        });
        let contacts = store.users_value(matches.take(usize::try_from(limit).unwrap_or(0)));
        let total = contacts.len();
        Ok(encode([("contacts", Value::Array(contacts)), ("total_count", total.into())]))
    }

    async fn add_contact(&self, phone_number: &str, first_name: &str, last_name: &str) -> Result<String> {
        let phone = normalize_phone(phone_number)?;
        let mut store = self.account().await?;
        let existing = store
            .users
            .values()
            .find(|user| !user.phone_number.is_empty() && user.phone_number == phone)
            .map(|user| user.id);
        let user_id = match existing {
            Some(id) => id,
            None => {
                let id = store.next_user_id;
                store.next_user_id += 1;
                store.users.insert(
                    id,
                    UserInfo {
                        id,
                        first_name: first_name.to_string(),
                        last_name: last_name.to_string(),
                        username: None,
                        phone_number: phone,
                        is_bot: false,
                        is_premium: false,
                    },
                );
                id
            }
        };
        store.contacts.insert(user_id);
        Ok(encode([
            ("success", true.into()),
            ("phone", phone_number.into()),
            ("name", format!("{} {}", first_name, last_name).into()),
        ]))
    }

    async fn delete_contact(&self, user_id: i64) -> Result<String> {
        let mut store = self.account().await?;
        store.user(user_id)?;
        store.contacts.remove(&user_id);
        Ok(encode([("success", true.into()), ("user_id", user_id.into())]))
    }

    async fn get_me(&self) -> Result<String> {
        let store = self.account().await?;
        let me = store.user(store.me)?;
        Ok(json::encode(&object_of(me.to_value())))
    }

    async fn get_user(&self, user_id: i64) -> Result<String> {
        let store = self.account().await?;
        Ok(json::encode(&object_of(store.user(user_id)?.to_value())))
    }

    async fn block_user(&self, user_id: i64) -> Result<String> {
        let mut store = self.account().await?;
        store.user(user_id)?;
        store.blocked.insert(user_id);
        Ok(encode([
            ("success", true.into()),
            ("user_id", user_id.into()),
            ("blocked", true.into()),
        ]))
    }

    async fn unblock_user(&self, user_id: i64) -> Result<String> {
        let mut store = self.account().await?;
        store.user(user_id)?;
        store.blocked.remove(&user_id);
        Ok(encode([
            ("success", true.into()),
            ("user_id", user_id.into()),
            ("blocked", false.into()),
        ]))
    }

    async fn get_chat_members(&self, chat_id: i64, limit: i32) -> Result<String> {
        let store = self.account().await?;
        let chat = store.chat(chat_id)?;
        let members = chat.active_members();
        let (members, total) = match chat.info.kind {
            ChatKind::BasicGroup => {
                let total = members.len();
                (members, total)
            }
            ChatKind::Supergroup | ChatKind::Channel => {
                let total = members.len();
                let page = members
                    .into_iter()
                    .take(usize::try_from(limit).unwrap_or(0))
                    .collect();
                (page, total)
            }
            ChatKind::Private | ChatKind::Secret => (Vec::new(), 0),
        };
        Ok(encode([("members", Value::Array(members)), ("total_count", total.into())]))
    }

    async fn add_chat_members(&self, chat_id: i64, user_ids: &[i64]) -> Result<String> {
        let mut store = self.account().await?;
        store.ensure_users(user_ids)?;
        let chat = store.group_mut(chat_id)?;
        for id in user_ids {
            chat.set_role(*id, MemberRole::Member);
        }
        Ok(encode([
            ("success", true.into()),
            ("chat_id", chat_id.into()),
            ("added_count", user_ids.len().into()),
        ]))
    }

    async fn promote_admin(&self, chat_id: i64, user_id: i64) -> Result<String> {
        self.set_member_role(chat_id, user_id, MemberRole::Administrator).await?;
        Ok(encode([
            ("success", true.into()),
            ("chat_id", chat_id.into()),
            ("user_id", user_id.into()),
            ("role", "administrator".into()),
        ]))
    }

    async fn demote_admin(&self, chat_id: i64, user_id: i64) -> Result<String> {
        self.set_member_role(chat_id, user_id, MemberRole::Member).await?;
        Ok(encode([
            ("success", true.into()),
            ("chat_id", chat_id.into()),
            ("user_id", user_id.into()),
            ("role", "member".into()),
        ]))
    }

    async fn ban_user(&self, chat_id: i64, user_id: i64) -> Result<String> {
        self.set_member_role(chat_id, user_id, MemberRole::Banned).await?;
        Ok(encode([
            ("success", true.into()),
            ("chat_id", chat_id.into()),
            ("user_id", user_id.into()),
            ("banned", true.into()),
        ]))
    }

    async fn unban_user(&self, chat_id: i64, user_id: i64) -> Result<String> {
        self.set_member_role(chat_id, user_id, MemberRole::Left).await?;
        Ok(encode([
            ("success", true.into()),
            ("chat_id", chat_id.into()),
            ("user_id", user_id.into()),
            ("banned", false.into()),
        ]))
    }

    async fn search_messages(&self, chat_id: i64, query: &str, limit: i32) -> Result<String> {
        let store = self.account().await?;
        let needle = query.to_lowercase();
        let hits: Vec<&MessageInfo> = store
            .chat(chat_id)?
            .history()
            .filter(|message| {
                message
                    .body
                    .text()
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            })
            .collect();
        let total = hits.len();
        let page = &hits[..total.min(usize::try_from(limit).unwrap_or(0))];
        let messages = json::records(page, |message| message.to_value());
        Ok(encode([("messages", messages), ("total_count", total.into())]))
    }

    async fn search_public_chats(&self, query: &str) -> Result<String> {
        let store = self.account().await?;
        let needle = query.to_lowercase();
        let chats: Vec<Value> = store
            .chats
            .values()
            .filter(|chat| matches!(chat.info.kind, ChatKind::Channel | ChatKind::Supergroup))
            .filter(|chat| chat.info.title.to_lowercase().contains(&needle))
            .map(|chat| chat.info.to_search_hit())
            .collect();
        let total = chats.len();
        Ok(encode([("chats", Value::Array(chats)), ("total_count", total.into())]))
    }
}

fn object_of(value: Value) -> ResultMap {
    match value {
        Value::Object(map) => map,
        _ => ResultMap::new(),
    }
}
