use pprovider::ProviderCatalog;
use serde_json::{Value, json};

use crate::ToolDefinition;

pub const LIST_PROVIDERS_TOOL: &str = "list_providers";

pub fn list_providers_definition() -> ToolDefinition {
    ToolDefinition::new(
        LIST_PROVIDERS_TOOL,
        "List the available LLM providers and their models with pricing per million tokens.",
        json!({
            "type": "object",
            "properties": {},
        }),
    )
}

/// `{providers: {<provider>: [ModelInfo, ...]}}` in provider order.
pub fn list_providers_payload(catalog: &ProviderCatalog) -> Value {
    json!({ "providers": catalog.list_providers() })
}
