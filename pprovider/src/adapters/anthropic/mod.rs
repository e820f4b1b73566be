mod provider;
mod serde_api;
mod tests;
mod transport;
mod types;

pub use provider::{AnthropicProvider, DEFAULT_MAX_TOKENS};
pub use transport::{
    ANTHROPIC_BASE_URL, ANTHROPIC_VERSION, AnthropicHttpTransport, AnthropicTransport,
};
pub use types::{
    AnthropicMessage, AnthropicRequest, AnthropicResponse, AnthropicRole, AnthropicStopReason,
    AnthropicUsage,
};
