#![cfg(all(feature = "provider-openai", feature = "provider-anthropic"))]

use std::sync::{Arc, Mutex};

use pprovider::adapters::anthropic::{
    AnthropicProvider, AnthropicRequest, AnthropicResponse, AnthropicTransport,
};
use pprovider::adapters::openai::{
    OpenAiFinishReason, OpenAiProvider, OpenAiRequest, OpenAiResponse, OpenAiTransport,
    OpenAiUsage,
};
use pprovider::{
    ErrorKind, GenerationCall, GenerationParams, GenerationResult, Generator, Message,
    ProviderCatalog, ProviderError, ProviderErrorKind, ProviderFuture, ProviderId,
    ProviderRegistry, SecretString, SecureCredentialManager,
};

#[derive(Debug, Default)]
struct OpenAiFake {
    requests: Mutex<Vec<OpenAiRequest>>,
}

impl OpenAiTransport for OpenAiFake {
    fn complete<'a>(
        &'a self,
        request: OpenAiRequest,
        _api_key: SecretString,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, ProviderError>> {
        Box::pin(async move {
            let model = request.model.clone();
            self.requests.lock().expect("requests lock").push(request);
            Ok(OpenAiResponse {
                model,
                content: "Hi.".to_string(),
                finish_reason: OpenAiFinishReason::Stop,
                usage: OpenAiUsage {
                    prompt_tokens: 2_000,
                    completion_tokens: 1_000,
                    total_tokens: 3_000,
                },
            })
        })
    }
}

#[derive(Debug, Default)]
struct OverloadedAnthropic;

impl AnthropicTransport for OverloadedAnthropic {
    fn complete<'a>(
        &'a self,
        _request: AnthropicRequest,
        _api_key: SecretString,
    ) -> ProviderFuture<'a, Result<AnthropicResponse, ProviderError>> {
        Box::pin(async { Err(ProviderError::rate_limited("Overloaded")) })
    }
}

fn generator(openai: Arc<OpenAiFake>) -> Generator {
    let credentials = Arc::new(SecureCredentialManager::new());
    credentials
        .set_api_key(ProviderId::OpenAi, "sk-test")
        .expect("openai key");
    credentials
        .set_api_key(ProviderId::Anthropic, "sk-ant-test")
        .expect("anthropic key");

    let mut registry = ProviderRegistry::new();
    registry.register(OpenAiProvider::new(Arc::clone(&credentials), openai));
    registry.register(AnthropicProvider::new(
        credentials,
        Arc::new(OverloadedAnthropic),
    ));

    Generator::new(Arc::new(registry), Arc::new(ProviderCatalog::builtin()))
}

#[tokio::test]
async fn openai_generation_reports_cost_from_catalog_rates() {
    let openai = Arc::new(OpenAiFake::default());
    let generator = generator(openai);

    let result = generator
        .generate(GenerationCall::new(
            ProviderId::OpenAi,
            "gpt-4o-mini",
            vec![Message::system("You are terse."), Message::user("Say hi")],
        ))
        .await;

    let GenerationResult::Success(success) = result else {
        panic!("expected success, got {result:?}");
    };
    assert_eq!(success.text, "Hi.");
    assert_eq!(success.provider, ProviderId::OpenAi);
    // 2000 * 0.15 / 1e6 + 1000 * 0.60 / 1e6
    assert!((success.estimated_cost - 0.0009).abs() < 1e-12);
}

#[tokio::test]
async fn reasoning_model_never_receives_sampling_fields() {
    let openai = Arc::new(OpenAiFake::default());
    let generator = generator(Arc::clone(&openai));

    let result = generator
        .generate(
            GenerationCall::new(ProviderId::OpenAi, "o1-mini", vec![Message::user("Think")])
                .with_params(GenerationParams::default().with_temperature(0.9).with_top_p(0.5)),
        )
        .await;
    assert!(result.is_success());

    let requests = openai.requests.lock().expect("requests lock");
    assert_eq!(requests[0].temperature, None);
    assert_eq!(requests[0].top_p, None);
}

#[tokio::test]
async fn anthropic_rejects_openai_temperature_range_before_calling() {
    let generator = generator(Arc::new(OpenAiFake::default()));

    let result = generator
        .generate(
            GenerationCall::new(
                ProviderId::Anthropic,
                "claude-3-5-haiku-20241022",
                vec![Message::user("hi")],
            )
            .with_params(GenerationParams::default().with_temperature(1.5)),
        )
        .await;

    let error = result.error().expect("temperature should be rejected");
    assert_eq!(error.kind, ErrorKind::ValidationError);
}

#[tokio::test]
async fn overloaded_anthropic_becomes_rate_limited_result() {
    let generator = generator(Arc::new(OpenAiFake::default()));

    let result = generator
        .generate(GenerationCall::new(
            ProviderId::Anthropic,
            "claude-3-5-sonnet-20240620",
            vec![Message::user("hi")],
        ))
        .await;

    let error = result.error().expect("overloaded call should fail");
    assert_eq!(error.kind, ErrorKind::ProviderError);
    assert_eq!(error.reason, Some(ProviderErrorKind::RateLimited));
}
