//! Tracing and metrics together, as installed by the server runtime.

use std::time::Duration;

use pprovider::{GenerationError, ModelResponse, ProviderId, ProviderOperationHooks};
use ptooling::{ToolError, ToolRuntimeHooks};

use crate::{MetricsObservabilityHooks, TracingObservabilityHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct StandardObservabilityHooks {
    tracing: TracingObservabilityHooks,
    metrics: MetricsObservabilityHooks,
}

impl ProviderOperationHooks for StandardObservabilityHooks {
    fn on_call_start(&self, provider: ProviderId, model: &str) {
        self.tracing.on_call_start(provider, model);
        self.metrics.on_call_start(provider, model);
    }

    fn on_call_success(
        &self,
        provider: ProviderId,
        model: &str,
        response: &ModelResponse,
        elapsed: Duration,
    ) {
        self.tracing.on_call_success(provider, model, response, elapsed);
        self.metrics.on_call_success(provider, model, response, elapsed);
    }

    fn on_call_failure(
        &self,
        provider: ProviderId,
        model: &str,
        error: &GenerationError,
        elapsed: Duration,
    ) {
        self.tracing.on_call_failure(provider, model, error, elapsed);
        self.metrics.on_call_failure(provider, model, error, elapsed);
    }
}

impl ToolRuntimeHooks for StandardObservabilityHooks {
    fn on_execution_start(&self, tool_name: &str) {
        self.tracing.on_execution_start(tool_name);
        self.metrics.on_execution_start(tool_name);
    }

    fn on_execution_success(&self, tool_name: &str, elapsed: Duration) {
        self.tracing.on_execution_success(tool_name, elapsed);
        self.metrics.on_execution_success(tool_name, elapsed);
    }

    fn on_execution_failure(&self, tool_name: &str, error: &ToolError, elapsed: Duration) {
        self.tracing.on_execution_failure(tool_name, error, elapsed);
        self.metrics.on_execution_failure(tool_name, error, elapsed);
    }
}
