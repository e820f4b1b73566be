//! Conversation storage contracts and the in-memory implementation.
//!
//! Each stored conversation carries its own turn lock. Holding it serializes
//! turns on one conversation without blocking any other conversation, and the
//! record itself is only locked for brief reads and appends.
//!
//! ```rust
//! use pchat::{Conversation, ConversationStore, InMemoryConversationStore};
//! use pcommon::{ConversationId, GenerationParams};
//! use pprovider::{Message, ProviderId};
//!
//! let runtime = tokio::runtime::Builder::new_current_thread()
//!     .build()
//!     .expect("runtime should build");
//!
//! runtime.block_on(async {
//!     let store = InMemoryConversationStore::new();
//!     let conversation = Conversation::new(
//!         ConversationId::from("conv-1"),
//!         ProviderId::OpenAi,
//!         "gpt-4o",
//!         GenerationParams::default(),
//!         vec![Message::user("hi")],
//!     );
//!
//!     store.insert(conversation).await.expect("insert");
//!     assert!(store.contains("conv-1").await.expect("lookup"));
//!     assert!(store.remove("conv-1").await.expect("remove").is_some());
//!     assert!(store.get("conv-1").await.expect("lookup").is_none());
//! });
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use pcommon::{BoxFuture, ConversationId};

use crate::{ChatError, Conversation};

pub type ChatFuture<'a, T> = BoxFuture<'a, T>;

pub type ConversationHandle = Arc<ConversationEntry>;

#[derive(Debug)]
pub struct ConversationEntry {
    turn: tokio::sync::Mutex<()>,
    record: Mutex<Conversation>,
}

impl ConversationEntry {
    pub fn new(conversation: Conversation) -> Self {
        Self {
            turn: tokio::sync::Mutex::new(()),
            record: Mutex::new(conversation),
        }
    }

    /// Waits until no other turn is running on this conversation.
    pub async fn begin_turn(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.turn.lock().await
    }

    pub fn snapshot(&self) -> Result<Conversation, ChatError> {
        Ok(self.record()?.clone())
    }

    pub fn update<R>(&self, apply: impl FnOnce(&mut Conversation) -> R) -> Result<R, ChatError> {
        let mut record = self.record()?;
        Ok(apply(&mut record))
    }

    fn record(&self) -> Result<MutexGuard<'_, Conversation>, ChatError> {
        self.record
            .lock()
            .map_err(|_| ChatError::store("conversation record lock poisoned"))
    }
}

pub trait ConversationStore: Send + Sync {
    fn insert<'a>(
        &'a self,
        conversation: Conversation,
    ) -> ChatFuture<'a, Result<ConversationHandle, ChatError>>;

    fn get<'a>(
        &'a self,
        conversation_id: &'a str,
    ) -> ChatFuture<'a, Result<Option<ConversationHandle>, ChatError>>;

    fn contains<'a>(&'a self, conversation_id: &'a str) -> ChatFuture<'a, Result<bool, ChatError>>;

    /// Every stored conversation in creation order.
    fn list<'a>(&'a self) -> ChatFuture<'a, Result<Vec<ConversationHandle>, ChatError>>;

    fn remove<'a>(
        &'a self,
        conversation_id: &'a str,
    ) -> ChatFuture<'a, Result<Option<ConversationHandle>, ChatError>>;
}

#[derive(Debug)]
struct StoredConversation {
    sequence: u64,
    handle: ConversationHandle,
}

#[derive(Debug, Default)]
struct StoreState {
    next_sequence: u64,
    conversations: HashMap<ConversationId, StoredConversation>,
}

#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    state: Mutex<StoreState>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, StoreState>, ChatError> {
        self.state
            .lock()
            .map_err(|_| ChatError::store("conversation store lock poisoned"))
    }
}

impl ConversationStore for InMemoryConversationStore {
    fn insert<'a>(
        &'a self,
        conversation: Conversation,
    ) -> ChatFuture<'a, Result<ConversationHandle, ChatError>> {
        Box::pin(async move {
            let mut state = self.state()?;
            if state.conversations.contains_key(&conversation.id) {
                return Err(ChatError::store(format!(
                    "conversation '{}' already exists",
                    conversation.id
                )));
            }

            let id = conversation.id.clone();
            let handle = Arc::new(ConversationEntry::new(conversation));
            let sequence = state.next_sequence;
            state.next_sequence += 1;
            state.conversations.insert(
                id,
                StoredConversation {
                    sequence,
                    handle: Arc::clone(&handle),
                },
            );

            Ok(handle)
        })
    }

    fn get<'a>(
        &'a self,
        conversation_id: &'a str,
    ) -> ChatFuture<'a, Result<Option<ConversationHandle>, ChatError>> {
        Box::pin(async move {
            Ok(self
                .state()?
                .conversations
                .get(conversation_id)
                .map(|stored| Arc::clone(&stored.handle)))
        })
    }

    fn contains<'a>(&'a self, conversation_id: &'a str) -> ChatFuture<'a, Result<bool, ChatError>> {
        Box::pin(async move { Ok(self.state()?.conversations.contains_key(conversation_id)) })
    }

    fn list<'a>(&'a self) -> ChatFuture<'a, Result<Vec<ConversationHandle>, ChatError>> {
        Box::pin(async move {
            let state = self.state()?;
            let mut stored = state.conversations.values().collect::<Vec<_>>();
            stored.sort_by_key(|entry| entry.sequence);

            Ok(stored
                .into_iter()
                .map(|entry| Arc::clone(&entry.handle))
                .collect())
        })
    }

    fn remove<'a>(
        &'a self,
        conversation_id: &'a str,
    ) -> ChatFuture<'a, Result<Option<ConversationHandle>, ChatError>> {
        Box::pin(async move {
            Ok(self
                .state()?
                .conversations
                .remove(conversation_id)
                .map(|stored| stored.handle))
        })
    }
}
