//! OpenAI provider implementation over transport and shared models.

use std::sync::Arc;

use reqwest::Client;

use crate::{
    ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderFuture, ProviderId,
    SecureCredentialManager,
};
use crate::adapters::is_empty_reply;

use super::transport::{OpenAiHttpTransport, OpenAiTransport};
use super::types::{OpenAiMessage, OpenAiRequest, OpenAiTokenParameter};

#[derive(Clone)]
pub struct OpenAiProvider {
    credentials: Arc<SecureCredentialManager>,
    transport: Arc<dyn OpenAiTransport>,
}

impl OpenAiProvider {
    pub fn new(
        credentials: Arc<SecureCredentialManager>,
        transport: Arc<dyn OpenAiTransport>,
    ) -> Self {
        Self {
            credentials,
            transport,
        }
    }

    pub fn default_http_transport(client: Client) -> OpenAiHttpTransport {
        OpenAiHttpTransport::new(client)
    }

    /// System messages stay inline; sampling fields are dropped for models that reject them.
    /// Empty assistant replies from earlier turns are left out of the history.
    pub(crate) fn build_openai_request(&self, request: ModelRequest) -> OpenAiRequest {
        let (temperature, top_p, token_parameter) = if request.sampling {
            (
                request.params.temperature,
                request.params.top_p,
                OpenAiTokenParameter::MaxTokens,
            )
        } else {
            (None, None, OpenAiTokenParameter::MaxCompletionTokens)
        };

        OpenAiRequest {
            model: request.model,
            messages: request
                .messages
                .into_iter()
                .filter(|message| !is_empty_reply(message))
                .map(OpenAiMessage::from)
                .collect(),
            temperature,
            top_p,
            max_tokens: request.params.max_tokens,
            token_parameter,
        }
    }
}

impl ModelProvider for OpenAiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let api_key = self.credentials.require_api_key(ProviderId::OpenAi)?;
            let openai_request = self.build_openai_request(request);
            let response = self.transport.complete(openai_request, api_key).await?;
            Ok(response.into_model_response())
        })
    }
}
