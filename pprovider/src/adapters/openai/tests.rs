//! Focused unit tests for OpenAI adapter internals.

#![cfg(test)]

use std::sync::Arc;

use pcommon::GenerationParams;

use crate::{
    Message, ModelRequest, ProviderError, ProviderFuture, SecretString, SecureCredentialManager,
};

use super::provider::OpenAiProvider;
use super::serde_api::{
    OpenAiApiResponse, build_api_request,
    extract_error_message, parse_finish_reason,
};
use super::transport::OpenAiTransport;
use super::types::{
    OpenAiFinishReason, OpenAiMessage, OpenAiRequest, OpenAiResponse, OpenAiRole,
    OpenAiTokenParameter,
};

#[derive(Debug)]
struct NoopTransport;

impl OpenAiTransport for NoopTransport {
    fn complete<'a>(
        &'a self,
        _request: OpenAiRequest,
        _api_key: SecretString,
    ) -> ProviderFuture<'a, Result<OpenAiResponse, ProviderError>> {
        Box::pin(async { Err(ProviderError::other("not used")) })
    }
}

fn provider() -> OpenAiProvider {
    OpenAiProvider::new(
        Arc::new(SecureCredentialManager::new()),
        Arc::new(NoopTransport),
    )
}

fn sample_request() -> OpenAiRequest {
    OpenAiRequest {
        model: "o1-mini".to_string(),
        messages: vec![OpenAiMessage {
            role: OpenAiRole::User,
            content: "hi".to_string(),
        }],
        temperature: None,
        top_p: None,
        max_tokens: Some(256),
        token_parameter: OpenAiTokenParameter::MaxTokens,
    }
}

#[test]
fn build_openai_request_keeps_system_message_inline() {
    let request = ModelRequest::new(
        "gpt-4o-mini",
        vec![Message::system("You are terse."), Message::user("hi")],
    )
    .with_params(GenerationParams::default().with_temperature(0.7).with_top_p(0.9));

    let built = provider().build_openai_request(request);
    assert_eq!(built.messages.len(), 2);
    assert_eq!(built.messages[0].role, OpenAiRole::System);
    assert_eq!(built.temperature, Some(0.7));
    assert_eq!(built.top_p, Some(0.9));
    assert_eq!(built.token_parameter, OpenAiTokenParameter::MaxTokens);
}

#[test]
fn build_openai_request_omits_sampling_for_reasoning_models() {
    let request = ModelRequest::new("o1-mini", vec![Message::user("hi")])
        .with_params(
            GenerationParams::default()
                .with_temperature(0.7)
                .with_top_p(0.5)
                .with_max_tokens(64),
        )
        .with_sampling(false);

    let built = provider().build_openai_request(request);
    assert_eq!(built.temperature, None);
    assert_eq!(built.top_p, None);
    assert_eq!(built.max_tokens, Some(64));
    assert_eq!(built.token_parameter, OpenAiTokenParameter::MaxCompletionTokens);
}

#[test]
fn parse_finish_reason_maps_expected_values() {
    assert_eq!(parse_finish_reason(Some("stop")), OpenAiFinishReason::Stop);
    assert_eq!(
        parse_finish_reason(Some("length")),
        OpenAiFinishReason::Length
    );
    assert_eq!(
        parse_finish_reason(Some("content_filter")),
        OpenAiFinishReason::ContentFilter
    );
    assert_eq!(
        parse_finish_reason(Some("unknown")),
        OpenAiFinishReason::Other
    );
    assert_eq!(parse_finish_reason(None), OpenAiFinishReason::Other);
}

#[test]
fn build_api_request_switches_token_parameter_name() {
    let legacy = build_api_request(sample_request()).expect("request should build");
    assert_eq!(legacy.max_tokens, Some(256));
    assert_eq!(legacy.max_completion_tokens, None);

    let modern = build_api_request(OpenAiRequest {
        token_parameter: OpenAiTokenParameter::MaxCompletionTokens,
        ..sample_request()
    })
    .expect("request should build");
    assert_eq!(modern.max_tokens, None);
    assert_eq!(modern.max_completion_tokens, Some(256));
}

#[test]
fn api_request_serializes_without_absent_fields() {
    let api_request = build_api_request(sample_request()).expect("request should build");
    let json = serde_json::to_value(&api_request).expect("request should serialize");

    assert_eq!(
        json,
        serde_json::json!({
            "model": "o1-mini",
            "messages": [{ "role": "user", "content": "hi" }],
            "max_tokens": 256,
        })
    );
}

#[test]
fn build_api_request_rejects_blank_message_content() {
    let mut request = sample_request();
    request.messages[0].content = "  ".to_string();

    assert!(build_api_request(request).is_err());
}

#[test]
fn api_response_converts_first_choice() {
    let parsed: OpenAiApiResponse = serde_json::from_value(serde_json::json!({
        "model": "gpt-4o-2024-08-06",
        "choices": [{
            "message": { "role": "assistant", "content": "Hi." },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 9, "completion_tokens": 2, "total_tokens": 11 }
    }))
    .expect("payload should parse");

    let response = OpenAiResponse::try_from(parsed).expect("response should convert");
    assert_eq!(response.content, "Hi.");
    assert_eq!(response.finish_reason, OpenAiFinishReason::Stop);
    assert_eq!(response.usage.total_tokens, 11);
}

#[test]
fn api_response_without_choices_is_invalid_response() {
    let parsed: OpenAiApiResponse = serde_json::from_value(serde_json::json!({
        "model": "gpt-4o",
        "choices": []
    }))
    .expect("payload should parse");

    let error = OpenAiResponse::try_from(parsed).expect_err("empty choices should fail");
    assert_eq!(error.kind, crate::ProviderErrorKind::InvalidResponse);
}

#[test]
fn extract_error_message_reads_error_envelope() {
    let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
    assert_eq!(
        extract_error_message(body).as_deref(),
        Some("Incorrect API key provided")
    );
    assert_eq!(extract_error_message("<html>"), None);
}

#[test]
fn filtered_reply_parses_as_empty_text() {
    let parsed: OpenAiApiResponse = serde_json::from_value(serde_json::json!({
        "model": "gpt-4o",
        "choices": [{
            "message": { "role": "assistant", "content": null },
            "finish_reason": "content_filter"
        }],
        "usage": { "prompt_tokens": 9, "completion_tokens": 0, "total_tokens": 9 }
    }))
    .expect("payload should parse");

    let response = OpenAiResponse::try_from(parsed).expect("response should convert");
    assert_eq!(response.content, "");
    assert_eq!(response.finish_reason, OpenAiFinishReason::ContentFilter);
}

#[test]
fn empty_assistant_turns_are_left_out_of_the_next_request() {
    let request = ModelRequest::new(
        "gpt-4o",
        vec![
            Message::system("You are terse."),
            Message::user("hi"),
            Message::assistant(""),
            Message::user("again"),
        ],
    );

    let built = provider().build_openai_request(request);
    assert_eq!(built.messages.len(), 3);
    assert_eq!(built.messages[1].content, "hi");
    assert_eq!(built.messages[2].content, "again");

    let api_request = build_api_request(built).expect("request should build");
    assert_eq!(api_request.messages.len(), 3);
}

#[test]
fn empty_user_message_is_still_rejected() {
    let request = ModelRequest::new("gpt-4o", vec![Message::user("hi"), Message::user("  ")]);
    let built = provider().build_openai_request(request);

    let error = build_api_request(built).expect_err("blank user content should fail");
    assert_eq!(error.kind, crate::ProviderErrorKind::InvalidRequest);
}
