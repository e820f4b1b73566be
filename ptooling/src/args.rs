//! Typed decoding of JSON tool arguments.
//!
//! ```rust
//! use ptooling::{decode_arguments, parse_provider};
//! use pprovider::ProviderId;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Query {
//!     provider: String,
//! }
//!
//! let args: Query = decode_arguments(serde_json::json!({ "provider": "openai" }))
//!     .expect("arguments should decode");
//! assert_eq!(parse_provider(&args.provider).expect("known provider"), ProviderId::OpenAi);
//! ```

use pprovider::ProviderId;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::ToolError;

/// Decodes tool arguments; a missing or `null` argument object reads as `{}`.
pub fn decode_arguments<T>(arguments: Value) -> Result<T, ToolError>
where
    T: DeserializeOwned,
{
    let arguments = match arguments {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };

    serde_json::from_value(arguments)
        .map_err(|err| ToolError::invalid_arguments(format!("invalid arguments: {err}")))
}

pub fn parse_provider(value: &str) -> Result<ProviderId, ToolError> {
    value
        .parse()
        .map_err(|err: pprovider::ProviderError| ToolError::invalid_arguments(err.message))
}

pub fn require_text(field: &str, value: &str) -> Result<(), ToolError> {
    if value.trim().is_empty() {
        return Err(ToolError::invalid_arguments(format!(
            "{field} must not be empty"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pprovider::GenerationParams;
    use serde::Deserialize;
    use serde_json::json;

    use super::*;
    use crate::ToolErrorKind;

    #[derive(Debug, Deserialize)]
    struct Empty {}

    #[test]
    fn null_arguments_read_as_empty_object() {
        let decoded: Result<Empty, _> = decode_arguments(Value::Null);
        assert!(decoded.is_ok());
    }

    #[test]
    fn wrong_types_are_invalid_arguments() {
        let error = decode_arguments::<GenerationParams>(json!({ "max_tokens": -5 }))
            .expect_err("negative max_tokens should fail");
        assert_eq!(error.kind, ToolErrorKind::InvalidArguments);
        assert!(error.message.starts_with("invalid arguments:"));
    }

    #[test]
    fn integer_temperature_is_accepted() {
        let params: GenerationParams =
            decode_arguments(json!({ "temperature": 1, "top_p": 0.5 })).expect("decode");
        assert_eq!(params.temperature, Some(1.0));
        assert_eq!(params.top_p, Some(0.5));
        assert_eq!(params.max_tokens, None);
    }

    #[test]
    fn unknown_provider_is_invalid_arguments() {
        let error = parse_provider("gemini").expect_err("unknown provider");
        assert_eq!(error.kind, ToolErrorKind::InvalidArguments);
        assert!(error.message.contains("gemini"));
    }

    #[test]
    fn blank_text_is_rejected() {
        assert!(require_text("user_prompt", "  ").is_err());
        assert!(require_text("user_prompt", "hi").is_ok());
    }
}
