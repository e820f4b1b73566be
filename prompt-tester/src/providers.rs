//! Provider construction from API keys and configuration.

use std::sync::Arc;
use std::time::Duration;

use pprovider::{
    DEFAULT_REQUEST_TIMEOUT, ModelProvider, ProviderError, ProviderId, ProviderRegistry,
    SecretString, SecureCredentialManager,
};
use reqwest::Client;

use crate::config::PromptTesterConfig;

#[derive(Debug, Clone)]
pub struct ProviderBuildConfig {
    pub provider_id: ProviderId,
    pub api_key: SecretString,
    pub timeout: Duration,
    pub base_url: Option<String>,
}

impl ProviderBuildConfig {
    pub fn new(provider_id: ProviderId, api_key: impl Into<String>) -> Self {
        Self {
            provider_id,
            api_key: SecretString::new(api_key),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            base_url: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

pub fn build_provider_from_api_key(
    provider_id: ProviderId,
    api_key: impl Into<String>,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    build_provider_with_config(ProviderBuildConfig::new(provider_id, api_key))
}

pub fn build_provider_with_config(
    config: ProviderBuildConfig,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    if config.api_key.is_empty() {
        return Err(ProviderError::authentication(
            "provider API key must not be empty",
        ));
    }

    let credentials = Arc::new(SecureCredentialManager::new());
    credentials.set_api_key(config.provider_id, config.api_key.expose().trim())?;

    let http = Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|err| ProviderError::transport(err.to_string()))?;

    match config.provider_id {
        ProviderId::OpenAi => build_openai_provider(credentials, http, config.base_url),
        ProviderId::Anthropic => build_anthropic_provider(credentials, http, config.base_url),
    }
}

/// Registers every provider that has a key; the rest stay unregistered.
pub fn build_registry(config: &PromptTesterConfig) -> Result<ProviderRegistry, ProviderError> {
    let mut registry = ProviderRegistry::new();
    for provider_id in config.configured_providers() {
        let Some(api_key) = config.api_key(provider_id) else {
            continue;
        };

        let mut build = ProviderBuildConfig::new(provider_id, api_key.expose())
            .with_timeout(config.request_timeout);
        if let Some(base_url) = config.base_url(provider_id) {
            build = build.with_base_url(base_url);
        }

        registry.register_arc(build_provider_with_config(build)?);
        tracing::info!(provider = %provider_id, "provider registered");
    }

    Ok(registry)
}

#[cfg(feature = "provider-openai")]
fn build_openai_provider(
    credentials: Arc<SecureCredentialManager>,
    http: Client,
    base_url: Option<String>,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    use pprovider::adapters::openai::OpenAiProvider;

    let mut transport = OpenAiProvider::default_http_transport(http);
    if let Some(base_url) = base_url {
        transport = transport.with_base_url(base_url);
    }
    Ok(Arc::new(OpenAiProvider::new(credentials, Arc::new(transport))))
}

#[cfg(not(feature = "provider-openai"))]
fn build_openai_provider(
    _credentials: Arc<SecureCredentialManager>,
    _http: Client,
    _base_url: Option<String>,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    Err(ProviderError::invalid_request(
        "provider-openai feature is not enabled on prompt-tester",
    ))
}

#[cfg(feature = "provider-anthropic")]
fn build_anthropic_provider(
    credentials: Arc<SecureCredentialManager>,
    http: Client,
    base_url: Option<String>,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    use pprovider::adapters::anthropic::AnthropicProvider;

    let mut transport = AnthropicProvider::default_http_transport(http);
    if let Some(base_url) = base_url {
        transport = transport.with_base_url(base_url);
    }
    Ok(Arc::new(AnthropicProvider::new(
        credentials,
        Arc::new(transport),
    )))
}

#[cfg(not(feature = "provider-anthropic"))]
fn build_anthropic_provider(
    _credentials: Arc<SecureCredentialManager>,
    _http: Client,
    _base_url: Option<String>,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    Err(ProviderError::invalid_request(
        "provider-anthropic feature is not enabled on prompt-tester",
    ))
}
