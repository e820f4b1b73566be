//! Anthropic transport trait and reqwest-based HTTP implementation.

use reqwest::{Client, Response};

use crate::adapters::http::{endpoint, error_for_send, error_for_status};
use crate::{ProviderError, ProviderFuture, SecretString};

use super::serde_api::{AnthropicApiResponse, build_api_request, extract_error_message};
use super::types::{AnthropicRequest, AnthropicResponse};

pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

pub trait AnthropicTransport: Send + Sync + std::fmt::Debug {
    fn complete<'a>(
        &'a self,
        request: AnthropicRequest,
        api_key: SecretString,
    ) -> ProviderFuture<'a, Result<AnthropicResponse, ProviderError>>;
}

#[derive(Debug, Clone)]
pub struct AnthropicHttpTransport {
    client: Client,
    base_url: String,
}

impl AnthropicHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: ANTHROPIC_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn parse_error(response: Response) -> ProviderError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body)
            .unwrap_or_else(|| format!("Anthropic request failed with status {status}"));

        error_for_status(status, message)
    }
}

impl AnthropicTransport for AnthropicHttpTransport {
    fn complete<'a>(
        &'a self,
        request: AnthropicRequest,
        api_key: SecretString,
    ) -> ProviderFuture<'a, Result<AnthropicResponse, ProviderError>> {
        Box::pin(async move {
            let api_request = build_api_request(request)?;
            let url = endpoint(&self.base_url, "messages");
            let response = self
                .client
                .post(url)
                .header("x-api-key", api_key.expose())
                .header("anthropic-version", ANTHROPIC_VERSION)
                .json(&api_request)
                .send()
                .await
                .map_err(error_for_send)?;

            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }

            let parsed: AnthropicApiResponse = response
                .json()
                .await
                .map_err(|err| ProviderError::invalid_response(err.to_string()))?;

            AnthropicResponse::try_from(parsed)
        })
    }
}
