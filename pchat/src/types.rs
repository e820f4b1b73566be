//! Conversation records and the request/outcome types of the chat service.

use chrono::{DateTime, Utc};
use pcommon::{ConversationId, GenerationParams};
use pprovider::{
    CostBreakdown, GenerationResult, GenerationSuccess, Message, ProviderId, Role, TokenUsage,
};
use serde::Serialize;

/// System prompts longer than this are shortened in `list` summaries.
pub const SYSTEM_PROMPT_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    pub id: ConversationId,
    pub provider: ProviderId,
    pub model: String,
    /// Parameters given at start; reused by every continue unless overridden.
    pub params: GenerationParams,
    pub messages: Vec<Message>,
    /// Usage and cost of the most recent successful turn.
    pub last_turn: Option<TurnStats>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(
        id: ConversationId,
        provider: ProviderId,
        model: impl Into<String>,
        params: GenerationParams,
        messages: Vec<Message>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            provider,
            model: model.into(),
            params,
            messages,
            last_turn: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn turn_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|message| message.role == Role::Assistant)
            .count()
    }

    pub fn system_prompt(&self) -> Option<&str> {
        self.messages
            .first()
            .filter(|message| message.role == Role::System)
            .map(|message| message.content.as_str())
    }

    pub fn summary(&self) -> ConversationSummary {
        let first_user_message = self
            .messages
            .iter()
            .find(|message| message.role == Role::User)
            .map(|message| message.content.clone())
            .unwrap_or_default();
        let latest_assistant_message = self
            .messages
            .iter()
            .rev()
            .find(|message| message.role == Role::Assistant)
            .map(|message| message.content.clone())
            .unwrap_or_default();

        ConversationSummary {
            id: self.id.clone(),
            provider: self.provider,
            model: self.model.clone(),
            system_prompt: preview(self.system_prompt().unwrap_or_default()),
            first_user_message,
            latest_assistant_message,
            turn_count: self.turn_count(),
            message_count: self.messages.len(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn history(&self) -> ConversationHistory {
        ConversationHistory {
            conversation_id: self.id.clone(),
            messages: self.messages.clone(),
            provider: self.provider,
            model: self.model.clone(),
            system_prompt: self.system_prompt().map(str::to_string),
            hyperparameters: self.params,
            last_turn: self.last_turn.clone(),
        }
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() <= SYSTEM_PROMPT_PREVIEW_CHARS {
        return text.to_string();
    }

    let mut shortened = text
        .chars()
        .take(SYSTEM_PROMPT_PREVIEW_CHARS)
        .collect::<String>();
    shortened.push_str("...");
    shortened
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnStats {
    pub usage: TokenUsage,
    pub costs: CostBreakdown,
    pub response_time_ms: u64,
}

impl From<&GenerationSuccess> for TurnStats {
    fn from(value: &GenerationSuccess) -> Self {
        Self {
            usage: value.usage,
            costs: value.costs.clone(),
            response_time_ms: value.response_time_ms,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StartConversation {
    pub provider: ProviderId,
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub params: GenerationParams,
}

impl StartConversation {
    pub fn new(
        provider: ProviderId,
        model: impl Into<String>,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            params: GenerationParams::default(),
        }
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartOutcome {
    /// Absent when the first call failed and nothing was stored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<ConversationId>,
    pub result: GenerationResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContinueOutcome {
    pub result: GenerationResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversationHistory {
    pub conversation_id: ConversationId,
    pub messages: Vec<Message>,
    pub provider: ProviderId,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    pub hyperparameters: GenerationParams,
    /// Flattened to `usage`, `costs` and `response_time_ms`.
    #[serde(flatten)]
    pub last_turn: Option<TurnStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationSummary {
    pub id: ConversationId,
    pub provider: ProviderId,
    pub model: String,
    pub system_prompt: String,
    pub first_user_message: String,
    pub latest_assistant_message: String,
    pub turn_count: usize,
    pub message_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CloseOutcome {
    pub conversation_id: ConversationId,
    pub closed: bool,
}
