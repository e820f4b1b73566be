mod provider;
mod serde_api;
mod tests;
mod transport;
mod types;

pub use provider::OpenAiProvider;
pub use transport::{OPENAI_BASE_URL, OpenAiHttpTransport, OpenAiTransport};
pub use types::{
    OpenAiFinishReason, OpenAiMessage, OpenAiRequest, OpenAiResponse, OpenAiRole,
    OpenAiTokenParameter, OpenAiUsage,
};
