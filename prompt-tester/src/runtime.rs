//! Runtime wiring from configuration to a ready tool dispatcher.

use std::sync::Arc;
use std::time::Duration;

use pchat::{ChatService, ConversationStore, InMemoryConversationStore};
use pobserve::{SafeProviderHooks, SafeToolHooks, StandardObservabilityHooks};
use pprovider::{Generator, ProviderCatalog, ProviderError, ProviderRegistry};
use ptooling::{Dispatcher, ToolRegistry, register_prompt_tools};

use crate::config::PromptTesterConfig;
use crate::providers::build_registry;

/// Everything a server needs; the conversation store lives as long as this bundle.
#[derive(Clone)]
pub struct RuntimeBundle {
    pub generator: Arc<Generator>,
    pub chat: ChatService,
    pub dispatcher: Dispatcher,
}

pub fn build_runtime(config: &PromptTesterConfig) -> Result<RuntimeBundle, ProviderError> {
    let registry = build_registry(config)?;
    Ok(build_runtime_with(registry, config.request_timeout))
}

pub fn build_runtime_with(registry: ProviderRegistry, timeout: Duration) -> RuntimeBundle {
    build_runtime_with_store(
        registry,
        timeout,
        Arc::new(InMemoryConversationStore::new()),
    )
}

pub fn build_runtime_with_store(
    registry: ProviderRegistry,
    timeout: Duration,
    store: Arc<dyn ConversationStore>,
) -> RuntimeBundle {
    let generator = Arc::new(
        Generator::new(Arc::new(registry), Arc::new(ProviderCatalog::builtin()))
            .with_timeout(timeout)
            .with_hooks(Arc::new(SafeProviderHooks::new(
                StandardObservabilityHooks::default(),
            ))),
    );
    let chat = ChatService::new(Arc::clone(&generator), store);

    let mut tools = ToolRegistry::new();
    register_prompt_tools(&mut tools, chat.clone());
    let dispatcher = Dispatcher::new(Arc::new(tools)).with_hooks(Arc::new(SafeToolHooks::new(
        StandardObservabilityHooks::default(),
    )));

    RuntimeBundle {
        generator,
        chat,
        dispatcher,
    }
}

#[cfg(test)]
mod tests {
    use pprovider::{
        ModelProvider, ModelRequest, ModelResponse, ProviderFuture, ProviderId, StopReason,
        TokenUsage,
    };
    use serde_json::json;

    use super::*;

    #[derive(Debug)]
    struct FakeProvider;

    impl ModelProvider for FakeProvider {
        fn id(&self) -> ProviderId {
            ProviderId::OpenAi
        }

        fn complete<'a>(
            &'a self,
            request: ModelRequest,
        ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
            Box::pin(async move {
                request.validate()?;
                Ok(ModelResponse {
                    provider: ProviderId::OpenAi,
                    model: request.model,
                    text: "done".to_string(),
                    stop_reason: StopReason::EndTurn,
                    usage: TokenUsage::new(3, 1),
                })
            })
        }
    }

    #[tokio::test]
    async fn runtime_shares_one_store_between_chat_and_dispatcher() {
        let mut registry = ProviderRegistry::new();
        registry.register(FakeProvider);
        let runtime = build_runtime_with(registry, Duration::from_secs(5));

        let output = runtime
            .dispatcher
            .handle(
                "test_multiturn_conversation",
                json!({
                    "mode": "start",
                    "provider": "openai",
                    "model": "gpt-4o-mini",
                    "system_prompt": "sys",
                    "user_prompt": "hello",
                }),
            )
            .await;
        assert!(!output.is_error, "{}", output.payload);

        let conversations = runtime.chat.list().await.expect("list");
        assert_eq!(conversations.len(), 1);
        assert_eq!(runtime.generator.timeout(), Duration::from_secs(5));
    }
}
