//! Shared provider error kinds and the caller-facing generation error.
//!
//! ```rust
//! use pprovider::{ErrorKind, GenerationError, ProviderError, ProviderErrorKind};
//!
//! let auth = ProviderError::authentication("bad key");
//! assert_eq!(auth.kind, ProviderErrorKind::Authentication);
//!
//! let surfaced = GenerationError::from(auth);
//! assert_eq!(surfaced.kind, ErrorKind::ProviderError);
//! assert_eq!(surfaced.reason, Some(ProviderErrorKind::Authentication));
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderErrorKind {
    Authentication,
    RateLimited,
    InvalidRequest,
    Timeout,
    Transport,
    Unavailable,
    InvalidResponse,
    Other,
}

impl ProviderErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::RateLimited => "rate_limited",
            Self::InvalidRequest => "invalid_request",
            Self::Timeout => "timeout",
            Self::Transport => "transport",
            Self::Unavailable => "unavailable",
            Self::InvalidResponse => "invalid_response",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Authentication, message)
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::RateLimited, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::InvalidRequest, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Timeout, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Transport, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Unavailable, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::InvalidResponse, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Other, message)
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ProviderError {}

/// Error categories surfaced to tool callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ValidationError,
    NotFound,
    ProviderError,
    InternalError,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ValidationError => "validation_error",
            Self::NotFound => "not_found",
            Self::ProviderError => "provider_error",
            Self::InternalError => "internal_error",
        }
    }
}

pub const INTERNAL_ERROR_MESSAGE: &str = "internal error while calling the provider";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationError {
    #[serde(rename = "error_kind")]
    pub kind: ErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<ProviderErrorKind>,
}

impl GenerationError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            reason: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValidationError, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn provider(reason: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::ProviderError,
            message: message.into(),
            reason: Some(reason),
        }
    }

    /// Internal failures never echo their detail; log it before building this value.
    pub fn internal() -> Self {
        Self::new(ErrorKind::InternalError, INTERNAL_ERROR_MESSAGE)
    }
}

impl Display for GenerationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.reason {
            Some(reason) => write!(f, "{:?}({}): {}", self.kind, reason.as_str(), self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for GenerationError {}

impl From<ProviderError> for GenerationError {
    fn from(value: ProviderError) -> Self {
        match value.kind {
            ProviderErrorKind::InvalidResponse | ProviderErrorKind::Other => Self::internal(),
            kind => Self::provider(kind, value.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_display_includes_kind() {
        let error = ProviderError::rate_limited("slow down");
        assert_eq!(error.to_string(), "RateLimited: slow down");
    }

    #[test]
    fn translation_failures_become_generic_internal_errors() {
        let error = GenerationError::from(ProviderError::invalid_response(
            "missing field `content` at line 1 column 9",
        ));

        assert_eq!(error.kind, ErrorKind::InternalError);
        assert_eq!(error.message, INTERNAL_ERROR_MESSAGE);
        assert_eq!(error.reason, None);
    }

    #[test]
    fn generation_error_serializes_with_wire_names() {
        let error = GenerationError::provider(ProviderErrorKind::Timeout, "timed out");
        let json = serde_json::to_value(&error).expect("error should serialize");

        assert_eq!(
            json,
            serde_json::json!({
                "error_kind": "provider_error",
                "message": "timed out",
                "reason": "timeout",
            })
        );

        let validation = serde_json::to_value(GenerationError::validation("bad"))
            .expect("error should serialize");
        assert_eq!(validation.get("reason"), None);
    }
}
