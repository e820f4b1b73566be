//! Anthropic Messages API adapter types and provider-agnostic conversions.

use crate::{ModelResponse, ProviderId, StopReason, TokenUsage};

#[derive(Debug, Clone, PartialEq)]
pub struct AnthropicRequest {
    pub model: String,
    pub system: Option<String>,
    pub messages: Vec<AnthropicMessage>,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnthropicMessage {
    pub role: AnthropicRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnthropicRole {
    User,
    Assistant,
}

impl AnthropicRole {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnthropicResponse {
    pub model: String,
    pub content: String,
    pub stop_reason: AnthropicStopReason,
    pub usage: AnthropicUsage,
}

impl AnthropicResponse {
    pub(crate) fn into_model_response(self) -> ModelResponse {
        ModelResponse {
            provider: ProviderId::Anthropic,
            model: self.model,
            text: self.content,
            stop_reason: self.stop_reason.into(),
            usage: self.usage.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnthropicStopReason {
    EndTurn,
    StopSequence,
    MaxTokens,
    Other,
}

impl From<AnthropicStopReason> for StopReason {
    fn from(value: AnthropicStopReason) -> Self {
        match value {
            AnthropicStopReason::EndTurn | AnthropicStopReason::StopSequence => Self::EndTurn,
            AnthropicStopReason::MaxTokens => Self::MaxTokens,
            AnthropicStopReason::Other => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnthropicUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl From<AnthropicUsage> for TokenUsage {
    fn from(value: AnthropicUsage) -> Self {
        TokenUsage::new(value.input_tokens, value.output_tokens)
    }
}
