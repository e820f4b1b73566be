#[cfg(any(feature = "provider-openai", feature = "provider-anthropic"))]
mod http;

#[cfg(feature = "provider-openai")]
pub mod openai;

#[cfg(feature = "provider-anthropic")]
pub mod anthropic;

/// A provider may answer with no text (content filter, reasoning budget spent).
/// The reply stays in history, but the APIs reject empty assistant turns.
#[cfg(any(feature = "provider-openai", feature = "provider-anthropic"))]
pub(crate) fn is_empty_reply(message: &crate::Message) -> bool {
    message.role == crate::Role::Assistant && message.content.trim().is_empty()
}
