//! Anthropic Messages API payload serde models and conversion helpers.

use serde::{Deserialize, Serialize};

use crate::ProviderError;

use super::types::{
    AnthropicMessage, AnthropicRequest, AnthropicResponse, AnthropicStopReason, AnthropicUsage,
};

pub(crate) fn build_api_request(
    request: AnthropicRequest,
) -> Result<AnthropicApiRequest, ProviderError> {
    let messages = request
        .messages
        .into_iter()
        .map(AnthropicApiMessage::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    if messages.is_empty() {
        return Err(ProviderError::invalid_request(
            "Anthropic request requires at least one message",
        ));
    }

    Ok(AnthropicApiRequest {
        model: request.model,
        max_tokens: request.max_tokens,
        system: request.system,
        messages,
        temperature: request.temperature,
        top_p: request.top_p,
    })
}

pub(crate) fn parse_stop_reason(value: Option<&str>) -> AnthropicStopReason {
    match value {
        Some("end_turn") => AnthropicStopReason::EndTurn,
        Some("stop_sequence") => AnthropicStopReason::StopSequence,
        Some("max_tokens") => AnthropicStopReason::MaxTokens,
        _ => AnthropicStopReason::Other,
    }
}

pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<AnthropicApiErrorEnvelope>(body).ok()?;
    Some(parsed.error.message)
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnthropicApiErrorEnvelope {
    pub error: AnthropicApiError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnthropicApiError {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnthropicApiRequest {
    pub model: String,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<AnthropicApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnthropicApiMessage {
    pub role: &'static str,
    pub content: String,
}

impl TryFrom<AnthropicMessage> for AnthropicApiMessage {
    type Error = ProviderError;

    fn try_from(value: AnthropicMessage) -> Result<Self, Self::Error> {
        if value.content.trim().is_empty() {
            return Err(ProviderError::invalid_request(
                "Anthropic message content must not be empty",
            ));
        }

        Ok(Self {
            role: value.role.as_str(),
            content: value.content,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnthropicApiResponse {
    pub model: String,
    pub content: Vec<AnthropicApiContentBlock>,
    pub stop_reason: Option<String>,
    pub usage: Option<AnthropicApiUsage>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum AnthropicApiContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnthropicApiUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl TryFrom<AnthropicApiResponse> for AnthropicResponse {
    type Error = ProviderError;

    fn try_from(value: AnthropicApiResponse) -> Result<Self, Self::Error> {
        let texts = value
            .content
            .into_iter()
            .filter_map(|block| match block {
                AnthropicApiContentBlock::Text { text } => Some(text),
                AnthropicApiContentBlock::Other => None,
            })
            .collect::<Vec<_>>();

        if texts.is_empty() {
            return Err(ProviderError::invalid_response(
                "Anthropic response did not include a text block",
            ));
        }

        let usage = value
            .usage
            .map(|usage| AnthropicUsage {
                input_tokens: usage.input_tokens,
                output_tokens: usage.output_tokens,
            })
            .unwrap_or_default();

        Ok(Self {
            model: value.model,
            content: texts.concat(),
            stop_reason: parse_stop_reason(value.stop_reason.as_deref()),
            usage,
        })
    }
}
