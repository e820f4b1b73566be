//! Common imports for embedding or testing the prompt-tester server.

pub use crate::{
    ChatService, ConversationId, Dispatcher, GenerationParams, GenerationResult, Generator,
    McpServer, Message, ModelProvider, ModelRequest, ModelResponse, PromptTesterConfig,
    ProviderBuildConfig, ProviderCatalog, ProviderError, ProviderFuture, ProviderId,
    ProviderRegistry, RuntimeBundle, StopReason, TokenUsage, ToolError, ToolOutput,
};
pub use crate::{
    build_provider_from_api_key, build_provider_with_config, build_registry, build_runtime,
    build_runtime_with, serve_stdio,
};
