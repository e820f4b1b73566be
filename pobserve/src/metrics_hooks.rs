//! Metrics-based observability hooks for provider calls and tool dispatch.
//!
//! ```rust
//! use pobserve::MetricsObservabilityHooks;
//! use pprovider::ProviderOperationHooks;
//!
//! fn accepts_provider_hooks(_hooks: &dyn ProviderOperationHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_provider_hooks(&hooks);
//! ```

use std::time::Duration;

use pprovider::{GenerationError, ModelResponse, ProviderId, ProviderOperationHooks};
use ptooling::{ToolError, ToolRuntimeHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl ProviderOperationHooks for MetricsObservabilityHooks {
    fn on_call_start(&self, provider: ProviderId, model: &str) {
        metrics::counter!(
            "prompt_tester_provider_call_start_total",
            "provider" => provider.to_string(),
            "model" => model.to_string()
        )
        .increment(1);
    }

    fn on_call_success(
        &self,
        provider: ProviderId,
        model: &str,
        response: &ModelResponse,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "prompt_tester_provider_call_success_total",
            "provider" => provider.to_string(),
            "model" => model.to_string()
        )
        .increment(1);
        metrics::counter!(
            "prompt_tester_provider_tokens_total",
            "provider" => provider.to_string(),
            "model" => model.to_string(),
            "direction" => "input"
        )
        .increment(u64::from(response.usage.input_tokens));
        metrics::counter!(
            "prompt_tester_provider_tokens_total",
            "provider" => provider.to_string(),
            "model" => model.to_string(),
            "direction" => "output"
        )
        .increment(u64::from(response.usage.output_tokens));
        metrics::histogram!(
            "prompt_tester_provider_call_duration_seconds",
            "provider" => provider.to_string(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_call_failure(
        &self,
        provider: ProviderId,
        model: &str,
        error: &GenerationError,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "prompt_tester_provider_call_failure_total",
            "provider" => provider.to_string(),
            "model" => model.to_string(),
            "error_kind" => error.kind.as_str(),
            "reason" => error.reason.map_or("none", |reason| reason.as_str())
        )
        .increment(1);
        metrics::histogram!(
            "prompt_tester_provider_call_duration_seconds",
            "provider" => provider.to_string(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}

impl ToolRuntimeHooks for MetricsObservabilityHooks {
    fn on_execution_start(&self, tool_name: &str) {
        metrics::counter!(
            "prompt_tester_tool_execution_start_total",
            "tool_name" => tool_name.to_string()
        )
        .increment(1);
    }

    fn on_execution_success(&self, tool_name: &str, elapsed: Duration) {
        metrics::counter!(
            "prompt_tester_tool_execution_success_total",
            "tool_name" => tool_name.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "prompt_tester_tool_execution_duration_seconds",
            "tool_name" => tool_name.to_string(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_execution_failure(&self, tool_name: &str, error: &ToolError, elapsed: Duration) {
        metrics::counter!(
            "prompt_tester_tool_execution_failure_total",
            "tool_name" => tool_name.to_string(),
            "error_kind" => error.error_kind().as_str()
        )
        .increment(1);
        metrics::histogram!(
            "prompt_tester_tool_execution_duration_seconds",
            "tool_name" => tool_name.to_string(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}
