//! Chat-layer errors and classification.
//!
//! ```rust
//! use pchat::{ChatError, ChatErrorKind};
//! use pprovider::ErrorKind;
//!
//! let error = ChatError::not_found("conv-1");
//! assert_eq!(error.kind, ChatErrorKind::NotFound);
//! assert_eq!(error.error_kind(), ErrorKind::NotFound);
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

use pprovider::{ErrorKind, GenerationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    InvalidRequest,
    NotFound,
    Store,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatError {
    pub kind: ChatErrorKind,
    pub message: String,
}

impl ChatError {
    pub fn new(kind: ChatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::InvalidRequest, message)
    }

    pub fn not_found(conversation_id: impl Display) -> Self {
        Self::new(
            ChatErrorKind::NotFound,
            format!("conversation '{conversation_id}' not found"),
        )
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Store, message)
    }

    /// Caller-facing category; store failures are reported as internal errors.
    pub fn error_kind(&self) -> ErrorKind {
        match self.kind {
            ChatErrorKind::InvalidRequest => ErrorKind::ValidationError,
            ChatErrorKind::NotFound => ErrorKind::NotFound,
            ChatErrorKind::Store => ErrorKind::InternalError,
        }
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ChatError {}

impl From<GenerationError> for ChatError {
    fn from(value: GenerationError) -> Self {
        match value.kind {
            ErrorKind::ValidationError => ChatError::invalid_request(value.message),
            ErrorKind::NotFound => ChatError::new(ChatErrorKind::NotFound, value.message),
            ErrorKind::ProviderError | ErrorKind::InternalError => ChatError::store(value.message),
        }
    }
}

impl From<ChatError> for GenerationError {
    fn from(value: ChatError) -> Self {
        GenerationError::new(value.error_kind(), value.message)
    }
}
