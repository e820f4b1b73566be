//! Multi-turn conversation state over the provider generation boundary.

mod error;
mod service;
mod store;
mod types;

pub mod prelude {
    pub use crate::{
        ChatError, ChatErrorKind, ChatService, CloseOutcome, ContinueOutcome, Conversation,
        ConversationHistory, ConversationStore, ConversationSummary, InMemoryConversationStore,
        StartConversation, StartOutcome, TurnStats,
    };
    pub use pcommon::{ConversationId, GenerationParams};
}

pub use error::{ChatError, ChatErrorKind};
pub use service::ChatService;
pub use store::{
    ChatFuture, ConversationEntry, ConversationHandle, ConversationStore,
    InMemoryConversationStore,
};
pub use types::{
    CloseOutcome, ContinueOutcome, Conversation, ConversationHistory, ConversationSummary,
    SYSTEM_PROMPT_PREVIEW_CHARS, StartConversation, StartOutcome, TurnStats,
};
pub use pcommon::{ConversationId, GenerationParams};
