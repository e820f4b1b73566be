//! Unified facade over the prompt-tester workspace crates.
//!
//! The binary serves three MCP tools over stdio: `list_providers`,
//! `test_comparison` and `test_multiturn_conversation`. Embedders can build
//! the same runtime from their own provider registry and drive the server
//! over any async byte stream.
//!
//! ```rust
//! use std::time::Duration;
//!
//! use prompt_tester::prelude::*;
//!
//! let runtime = tokio::runtime::Builder::new_current_thread()
//!     .enable_all()
//!     .build()
//!     .expect("runtime should build");
//!
//! runtime.block_on(async {
//!     let bundle = build_runtime_with(ProviderRegistry::new(), Duration::from_secs(5));
//!     let server = McpServer::new(bundle.dispatcher);
//!
//!     let response = server
//!         .handle_line(r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#)
//!         .await
//!         .expect("requests get a response");
//!     let tools = response.result.expect("tools result")["tools"].clone();
//!     assert_eq!(tools.as_array().map(Vec::len), Some(3));
//! });
//! ```

pub mod cli;
pub mod config;
pub mod prelude;
pub mod protocol;
pub mod providers;
pub mod runtime;
pub mod server;

pub use pchat;
pub use pcommon;
pub use pobserve;
pub use pprovider;
pub use ptooling;

pub use cli::{Cli, CliError, init_logging};
pub use config::{ConfigError, ConfigErrorKind, PromptTesterConfig, load_env_files};
pub use pchat::{ChatService, ConversationStore, InMemoryConversationStore};
pub use pcommon::{BoxFuture, ConversationId, GenerationParams};
pub use pprovider::{
    GenerationResult, Generator, Message, ModelProvider, ModelRequest, ModelResponse,
    ProviderCatalog, ProviderError, ProviderErrorKind, ProviderFuture, ProviderId,
    ProviderRegistry, Role, SecretString, StopReason, TokenUsage,
};
pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, PROTOCOL_VERSION};
pub use providers::{
    ProviderBuildConfig, build_provider_from_api_key, build_provider_with_config, build_registry,
};
pub use ptooling::{Dispatcher, ToolDefinition, ToolError, ToolErrorKind, ToolOutput, ToolRegistry};
pub use runtime::{RuntimeBundle, build_runtime, build_runtime_with, build_runtime_with_store};
pub use server::{McpServer, serve_stdio};
