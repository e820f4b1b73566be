//! Tool execution errors and their caller-facing classification.

use std::error::Error;
use std::fmt::{Display, Formatter};

use pchat::{ChatError, ChatErrorKind};
use pprovider::{ErrorKind, GenerationError};
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolErrorKind {
    UnknownTool,
    InvalidArguments,
    NotFound,
    Execution,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub message: String,
    pub tool_name: Option<String>,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            tool_name: None,
        }
    }

    pub fn unknown_tool(tool_name: &str) -> Self {
        Self::new(ToolErrorKind::UnknownTool, format!("unknown tool '{tool_name}'"))
            .with_tool_name(tool_name)
    }

    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidArguments, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::NotFound, message)
    }

    pub fn execution(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Execution, message)
    }

    pub fn with_tool_name(mut self, tool_name: impl Into<String>) -> Self {
        self.tool_name = Some(tool_name.into());
        self
    }

    /// Prefixes the message with where in the arguments the problem was found.
    pub fn at(mut self, location: impl Display) -> Self {
        self.message = format!("{location}: {}", self.message);
        self
    }

    pub fn error_kind(&self) -> ErrorKind {
        match self.kind {
            ToolErrorKind::UnknownTool | ToolErrorKind::InvalidArguments => {
                ErrorKind::ValidationError
            }
            ToolErrorKind::NotFound => ErrorKind::NotFound,
            ToolErrorKind::Execution => ErrorKind::InternalError,
        }
    }

    pub fn is_user_error(&self) -> bool {
        !matches!(self.kind, ToolErrorKind::Execution)
    }

    /// The `{error_kind, message}` body returned to the caller.
    pub fn payload(&self) -> Value {
        json!({
            "error_kind": self.error_kind(),
            "message": self.message,
        })
    }
}

impl Display for ToolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.tool_name {
            Some(tool_name) => write!(f, "{:?} [tool={}]: {}", self.kind, tool_name, self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for ToolError {}

impl From<ChatError> for ToolError {
    fn from(value: ChatError) -> Self {
        match value.kind {
            ChatErrorKind::InvalidRequest => Self::invalid_arguments(value.message),
            ChatErrorKind::NotFound => Self::not_found(value.message),
            ChatErrorKind::Store => Self::execution(value.message),
        }
    }
}

impl From<GenerationError> for ToolError {
    fn from(value: GenerationError) -> Self {
        match value.kind {
            ErrorKind::ValidationError => Self::invalid_arguments(value.message),
            ErrorKind::NotFound => Self::not_found(value.message),
            ErrorKind::ProviderError | ErrorKind::InternalError => Self::execution(value.message),
        }
    }
}
