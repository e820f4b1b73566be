//! Tool trait contract for registry-managed capabilities.
//!
//! ```rust
//! use ptooling::{FunctionTool, Tool, ToolDefinition};
//! use serde_json::json;
//!
//! let tool = FunctionTool::new(
//!     ToolDefinition::new("echo", "Echoes input", json!({ "type": "object" })),
//!     |args| async move { Ok(args) },
//! );
//!
//! assert_eq!(tool.definition().name, "echo");
//! ```

use std::future::Future;
use std::sync::Arc;

use pcommon::BoxFuture;
use serde_json::Value;

use crate::{ToolDefinition, ToolError};

pub type ToolFuture<'a, T> = BoxFuture<'a, T>;

pub trait Tool: Send + Sync {
    fn definition(&self) -> ToolDefinition;

    fn invoke<'a>(&'a self, arguments: Value) -> ToolFuture<'a, Result<Value, ToolError>>;
}

type ToolHandler = dyn Fn(Value) -> ToolFuture<'static, Result<Value, ToolError>> + Send + Sync;

pub struct FunctionTool {
    definition: ToolDefinition,
    handler: Arc<ToolHandler>,
}

impl FunctionTool {
    pub fn new<F, Fut>(definition: ToolDefinition, handler: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ToolError>> + Send + 'static,
    {
        let handler: Arc<ToolHandler> = Arc::new(move |arguments| Box::pin(handler(arguments)));

        Self {
            definition,
            handler,
        }
    }
}

impl Tool for FunctionTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    fn invoke<'a>(&'a self, arguments: Value) -> ToolFuture<'a, Result<Value, ToolError>> {
        (self.handler)(arguments)
    }
}
