//! Anthropic provider implementation over the native Messages API.

use std::sync::Arc;

use reqwest::Client;

use crate::{
    ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderFuture, ProviderId, Role,
    SecureCredentialManager,
};

use crate::adapters::is_empty_reply;

use super::transport::{AnthropicHttpTransport, AnthropicTransport};
use super::types::{AnthropicMessage, AnthropicRequest, AnthropicRole};

/// Sent when the caller leaves `max_tokens` unset; the API requires one.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

#[derive(Clone)]
pub struct AnthropicProvider {
    credentials: Arc<SecureCredentialManager>,
    transport: Arc<dyn AnthropicTransport>,
}

impl AnthropicProvider {
    pub fn new(
        credentials: Arc<SecureCredentialManager>,
        transport: Arc<dyn AnthropicTransport>,
    ) -> Self {
        Self {
            credentials,
            transport,
        }
    }

    pub fn default_http_transport(client: Client) -> AnthropicHttpTransport {
        AnthropicHttpTransport::new(client)
    }

    /// Moves the leading system message out of band and merges same-role runs,
    /// since the Messages API requires strictly alternating turns. Empty
    /// assistant replies are dropped first, so the user turns around them merge.
    pub(crate) fn build_anthropic_request(&self, request: ModelRequest) -> AnthropicRequest {
        let mut system = None;
        let mut messages: Vec<AnthropicMessage> = Vec::with_capacity(request.messages.len());

        for message in request.messages {
            if is_empty_reply(&message) {
                continue;
            }
            let role = match message.role {
                Role::System => {
                    system = Some(message.content);
                    continue;
                }
                Role::User => AnthropicRole::User,
                Role::Assistant => AnthropicRole::Assistant,
            };

            match messages.last_mut() {
                Some(previous) if previous.role == role => {
                    previous.content.push_str("\n\n");
                    previous.content.push_str(&message.content);
                }
                _ => messages.push(AnthropicMessage {
                    role,
                    content: message.content,
                }),
            }
        }

        let (temperature, top_p) = if request.sampling {
            (request.params.temperature, request.params.top_p)
        } else {
            (None, None)
        };

        AnthropicRequest {
            model: request.model,
            system,
            messages,
            max_tokens: request.params.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature,
            top_p,
        }
    }
}

impl ModelProvider for AnthropicProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Anthropic
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let api_key = self.credentials.require_api_key(ProviderId::Anthropic)?;
            let anthropic_request = self.build_anthropic_request(request);
            let response = self.transport.complete(anthropic_request, api_key).await?;
            Ok(response.into_model_response())
        })
    }
}
