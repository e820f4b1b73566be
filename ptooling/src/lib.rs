//! Tool registry, argument decoding and the dispatcher behind the prompt-testing tools.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use ptooling::{Dispatcher, ToolDefinition, ToolRegistry};
//! use serde_json::json;
//!
//! let mut registry = ToolRegistry::new();
//! registry.register_sync_fn(
//!     ToolDefinition::new("ping", "Replies with pong", json!({ "type": "object" })),
//!     |_| Ok(json!("pong")),
//! );
//!
//! let dispatcher = Dispatcher::new(Arc::new(registry));
//! assert_eq!(dispatcher.definitions()[0].name, "ping");
//! ```

mod args;
mod dispatcher;
mod error;
mod hooks;
mod registry;
mod tool;
pub mod tools;
mod types;

pub mod prelude {
    pub use crate::{
        Dispatcher, Tool, ToolDefinition, ToolError, ToolErrorKind, ToolFuture, ToolOutput,
        ToolRegistry, ToolRuntimeHooks, register_prompt_tools,
    };
}

pub use args::{decode_arguments, parse_provider, require_text};
pub use dispatcher::Dispatcher;
pub use error::{ToolError, ToolErrorKind};
pub use hooks::{NoopToolRuntimeHooks, ToolRuntimeHooks};
pub use registry::ToolRegistry;
pub use tool::{FunctionTool, Tool, ToolFuture};
pub use tools::register_prompt_tools;
pub use types::{ToolDefinition, ToolOutput, to_payload};
