//! Single entry point that routes tool calls and turns every outcome into data.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures_util::FutureExt;
use serde_json::Value;

use crate::{
    NoopToolRuntimeHooks, ToolDefinition, ToolError, ToolOutput, ToolRegistry, ToolRuntimeHooks,
};

#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    hooks: Arc<dyn ToolRuntimeHooks>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            hooks: Arc::new(NoopToolRuntimeHooks),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ToolRuntimeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn registry(&self) -> Arc<ToolRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.registry.definitions()
    }

    pub async fn handle(&self, tool_name: &str, arguments: Value) -> ToolOutput {
        let Some(tool) = self.registry.get(tool_name) else {
            let error = ToolError::unknown_tool(tool_name);
            tracing::debug!(tool = tool_name, "unknown tool requested");
            return ToolOutput::failure(&error);
        };

        self.hooks.on_execution_start(tool_name);
        let started_at = Instant::now();

        let outcome = AssertUnwindSafe(tool.invoke(arguments))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| {
                tracing::error!(tool = tool_name, "tool panicked");
                Err(ToolError::execution("internal error while running the tool"))
            });
        let elapsed = started_at.elapsed();

        match outcome {
            Ok(payload) => {
                self.hooks.on_execution_success(tool_name, elapsed);
                ToolOutput::success(payload)
            }
            Err(error) => {
                let error = error.with_tool_name(tool_name);
                if error.is_user_error() {
                    tracing::debug!(tool = tool_name, error = %error, "tool call rejected");
                } else {
                    tracing::error!(tool = tool_name, error = %error, "tool call failed");
                }
                self.hooks.on_execution_failure(tool_name, &error, elapsed);
                ToolOutput::failure(&error)
            }
        }
    }
}
