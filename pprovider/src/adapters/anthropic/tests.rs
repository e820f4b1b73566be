#![cfg(test)]

use std::sync::Arc;

use pcommon::GenerationParams;

use crate::{
    Message, ModelRequest, ProviderError, ProviderErrorKind, ProviderFuture, SecretString,
    SecureCredentialManager,
};

use super::provider::{AnthropicProvider, DEFAULT_MAX_TOKENS};
use super::serde_api::{
    AnthropicApiResponse, build_api_request, extract_error_message, parse_stop_reason,
};
use super::transport::AnthropicTransport;
use super::types::{AnthropicRequest, AnthropicResponse, AnthropicRole, AnthropicStopReason};

#[derive(Debug)]
struct NoopTransport;

impl AnthropicTransport for NoopTransport {
    fn complete<'a>(
        &'a self,
        _request: AnthropicRequest,
        _api_key: SecretString,
    ) -> ProviderFuture<'a, Result<AnthropicResponse, ProviderError>> {
        Box::pin(async { Err(ProviderError::other("not used")) })
    }
}

fn provider() -> AnthropicProvider {
    AnthropicProvider::new(
        Arc::new(SecureCredentialManager::new()),
        Arc::new(NoopTransport),
    )
}

#[test]
fn system_message_moves_out_of_band() {
    let request = ModelRequest::new(
        "claude-3-5-haiku-20241022",
        vec![Message::system("You are terse."), Message::user("Say hi")],
    );

    let built = provider().build_anthropic_request(request);
    assert_eq!(built.system.as_deref(), Some("You are terse."));
    assert_eq!(built.messages.len(), 1);
    assert_eq!(built.messages[0].role, AnthropicRole::User);
}

#[test]
fn consecutive_user_messages_are_coalesced() {
    let request = ModelRequest::new(
        "claude-3-5-haiku-20241022",
        vec![
            Message::user("first"),
            Message::assistant("reply"),
            Message::user("unanswered"),
            Message::user("again"),
        ],
    );

    let built = provider().build_anthropic_request(request);
    assert_eq!(built.system, None);
    assert_eq!(built.messages.len(), 3);
    assert_eq!(built.messages[2].content, "unanswered\n\nagain");
}

#[test]
fn max_tokens_defaults_when_absent() {
    let request = ModelRequest::new("claude-3-opus-20240229", vec![Message::user("hi")]);
    let built = provider().build_anthropic_request(request);
    assert_eq!(built.max_tokens, DEFAULT_MAX_TOKENS);

    let request = ModelRequest::new("claude-3-opus-20240229", vec![Message::user("hi")])
        .with_params(GenerationParams::default().with_max_tokens(42).with_top_p(0.3));
    let built = provider().build_anthropic_request(request);
    assert_eq!(built.max_tokens, 42);
    assert_eq!(built.top_p, Some(0.3));
}

#[test]
fn api_request_serializes_messages_api_shape() {
    let request = ModelRequest::new(
        "claude-3-5-sonnet-20240620",
        vec![Message::system("sys"), Message::user("hi")],
    )
    .with_params(GenerationParams::default().with_temperature(0.5));
    let built = provider().build_anthropic_request(request);

    let json = serde_json::to_value(build_api_request(built).expect("request should build"))
        .expect("request should serialize");
    assert_eq!(
        json,
        serde_json::json!({
            "model": "claude-3-5-sonnet-20240620",
            "max_tokens": 1000,
            "system": "sys",
            "messages": [{ "role": "user", "content": "hi" }],
            "temperature": 0.5,
        })
    );
}

#[test]
fn parse_stop_reason_maps_expected_values() {
    assert_eq!(parse_stop_reason(Some("end_turn")), AnthropicStopReason::EndTurn);
    assert_eq!(
        parse_stop_reason(Some("stop_sequence")),
        AnthropicStopReason::StopSequence
    );
    assert_eq!(
        parse_stop_reason(Some("max_tokens")),
        AnthropicStopReason::MaxTokens
    );
    assert_eq!(parse_stop_reason(None), AnthropicStopReason::Other);
}

#[test]
fn api_response_joins_text_blocks_and_ignores_others() {
    let parsed: AnthropicApiResponse = serde_json::from_value(serde_json::json!({
        "id": "msg_1",
        "type": "message",
        "role": "assistant",
        "model": "claude-3-5-haiku-20241022",
        "content": [
            { "type": "text", "text": "Hello" },
            { "type": "thinking", "thinking": "..." },
            { "type": "text", "text": " there" }
        ],
        "stop_reason": "end_turn",
        "usage": { "input_tokens": 10, "output_tokens": 4 }
    }))
    .expect("payload should parse");

    let response = AnthropicResponse::try_from(parsed).expect("response should convert");
    assert_eq!(response.content, "Hello there");
    assert_eq!(response.usage.input_tokens, 10);

    let model = response.into_model_response();
    assert_eq!(model.usage.total_tokens, 14);
}

#[test]
fn api_response_without_text_is_invalid_response() {
    let parsed: AnthropicApiResponse = serde_json::from_value(serde_json::json!({
        "model": "claude-3-5-haiku-20241022",
        "content": [],
        "stop_reason": "end_turn"
    }))
    .expect("payload should parse");

    let error = AnthropicResponse::try_from(parsed).expect_err("empty content should fail");
    assert_eq!(error.kind, ProviderErrorKind::InvalidResponse);
}

#[test]
fn extract_error_message_reads_error_envelope() {
    let body = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
    assert_eq!(extract_error_message(body).as_deref(), Some("Overloaded"));
}

#[test]
fn empty_text_block_parses_as_empty_reply() {
    let parsed: AnthropicApiResponse = serde_json::from_value(serde_json::json!({
        "model": "claude-3-5-haiku-20241022",
        "content": [{ "type": "text", "text": "" }],
        "stop_reason": "max_tokens"
    }))
    .expect("payload should parse");

    let response = AnthropicResponse::try_from(parsed).expect("response should convert");
    assert_eq!(response.content, "");
}

#[test]
fn empty_assistant_turn_is_dropped_and_user_turns_merge() {
    let request = ModelRequest::new(
        "claude-3-5-haiku-20241022",
        vec![
            Message::system("sys"),
            Message::user("hi"),
            Message::assistant(""),
            Message::user("again"),
        ],
    );

    let built = provider().build_anthropic_request(request);
    assert_eq!(built.messages.len(), 1);
    assert_eq!(built.messages[0].role, AnthropicRole::User);
    assert_eq!(built.messages[0].content, "hi\n\nagain");
    assert!(build_api_request(built).is_ok());
}
