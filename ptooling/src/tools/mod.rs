//! The prompt-testing tools exposed to callers.

mod comparison;
mod conversation;
mod list_providers;

use pchat::ChatService;

pub use comparison::{COMPARISON_TOOL, ComparisonTool, MAX_COMPARISONS};
pub use conversation::{CONVERSATION_TOOL, ConversationTool};
pub use list_providers::{LIST_PROVIDERS_TOOL, list_providers_definition, list_providers_payload};

use crate::ToolRegistry;

/// Registers `list_providers`, `test_comparison` and `test_multiturn_conversation`.
pub fn register_prompt_tools(registry: &mut ToolRegistry, chat: ChatService) {
    let generator = chat.generator().clone();

    let providers = list_providers_payload(generator.catalog());
    registry.register_sync_fn(list_providers_definition(), move |_| Ok(providers.clone()));
    registry.register(ComparisonTool::new(generator));
    registry.register(ConversationTool::new(chat));
}
