//! OpenAI transport trait and reqwest-based HTTP implementation.

use reqwest::{Client, Response};

use crate::adapters::http::{endpoint, error_for_send, error_for_status};
use crate::{ProviderError, ProviderFuture, SecretString};

use super::serde_api::{OpenAiApiResponse, build_api_request, extract_error_message};
use super::types::{OpenAiRequest, OpenAiResponse};

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

pub trait OpenAiTransport: Send + Sync + std::fmt::Debug {
    fn complete<'a>(
        &'a self,
        request: OpenAiRequest,
        api_key: SecretString,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, ProviderError>>;
}

#[derive(Debug, Clone)]
pub struct OpenAiHttpTransport {
    client: Client,
    base_url: String,
}

impl OpenAiHttpTransport {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: OPENAI_BASE_URL.to_string(),
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
            .unwrap_or_else(|| format!("OpenAI request failed with status {status}"));

        error_for_status(status, message)
    }
}

impl OpenAiTransport for OpenAiHttpTransport {
    fn complete<'a>(
        &'a self,
        request: OpenAiRequest,
        api_key: SecretString,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, ProviderError>> {
        Box::pin(async move {
            let api_request = build_api_request(request)?;
            let url = endpoint(&self.base_url, "chat/completions");
            let response = self
                .client
                .post(url)
                .bearer_auth(api_key.expose())
                .json(&api_request)
                .send()
                .await
                .map_err(error_for_send)?;

            if !response.status().is_success() {
                return Err(Self::parse_error(response).await);
            }

            let parsed: OpenAiApiResponse = response
                .json()
                .await
                .map_err(|err| ProviderError::invalid_response(err.to_string()))?;

            OpenAiResponse::try_from(parsed)
        })
    }
}
