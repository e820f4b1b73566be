//! Tracing-based observability hooks for provider calls and tool dispatch.
//!
//! ```rust
//! use pobserve::TracingObservabilityHooks;
//! use ptooling::ToolRuntimeHooks;
//!
//! fn accepts_tool_hooks(_hooks: &dyn ToolRuntimeHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_tool_hooks(&hooks);
//! ```

use std::time::Duration;

use pprovider::{ErrorKind, GenerationError, ModelResponse, ProviderId, ProviderOperationHooks};
use ptooling::{ToolError, ToolRuntimeHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl ProviderOperationHooks for TracingObservabilityHooks {
    fn on_call_start(&self, provider: ProviderId, model: &str) {
        tracing::debug!(phase = "provider", event = "call_start", provider = %provider, model);
    }

    fn on_call_success(
        &self,
        provider: ProviderId,
        model: &str,
        response: &ModelResponse,
        elapsed: Duration,
    ) {
        tracing::info!(
            phase = "provider",
            event = "call_success",
            provider = %provider,
            model,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            stop_reason = ?response.stop_reason,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_call_failure(
        &self,
        provider: ProviderId,
        model: &str,
        error: &GenerationError,
        elapsed: Duration,
    ) {
        let reason = error.reason.map(|reason| reason.as_str());
        if error.kind == ErrorKind::InternalError {
            tracing::error!(
                phase = "provider",
                event = "call_failure",
                provider = %provider,
                model,
                error_kind = error.kind.as_str(),
                reason,
                elapsed_ms = elapsed.as_millis() as u64,
                error = %error
            );
        } else {
            tracing::warn!(
                phase = "provider",
                event = "call_failure",
                provider = %provider,
                model,
                error_kind = error.kind.as_str(),
                reason,
                elapsed_ms = elapsed.as_millis() as u64,
                error = %error
            );
        }
    }
}

impl ToolRuntimeHooks for TracingObservabilityHooks {
    fn on_execution_start(&self, tool_name: &str) {
        tracing::info!(phase = "tool", event = "execution_start", tool_name);
    }

    fn on_execution_success(&self, tool_name: &str, elapsed: Duration) {
        tracing::info!(
            phase = "tool",
            event = "execution_success",
            tool_name,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_execution_failure(&self, tool_name: &str, error: &ToolError, elapsed: Duration) {
        tracing::warn!(
            phase = "tool",
            event = "execution_failure",
            tool_name,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = error.error_kind().as_str(),
            error = %error
        );
    }
}
