use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use pprovider::{GenerationError, ModelResponse, ProviderId, ProviderOperationHooks};
use ptooling::{ToolError, ToolRuntimeHooks};

pub struct SafeProviderHooks<H> {
    inner: H,
}

impl<H> SafeProviderHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ProviderOperationHooks for SafeProviderHooks<H>
where
    H: ProviderOperationHooks,
{
    fn on_call_start(&self, provider: ProviderId, model: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_call_start(provider, model)));
    }

    fn on_call_success(
        &self,
        provider: ProviderId,
        model: &str,
        response: &ModelResponse,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_call_success(provider, model, response, elapsed)
        }));
    }

    fn on_call_failure(
        &self,
        provider: ProviderId,
        model: &str,
        error: &GenerationError,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_call_failure(provider, model, error, elapsed)
        }));
    }
}

pub struct SafeToolHooks<H> {
    inner: H,
}

impl<H> SafeToolHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ToolRuntimeHooks for SafeToolHooks<H>
where
    H: ToolRuntimeHooks,
{
    fn on_execution_start(&self, tool_name: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_execution_start(tool_name)));
    }

    fn on_execution_success(&self, tool_name: &str, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_execution_success(tool_name, elapsed)
        }));
    }

    fn on_execution_failure(&self, tool_name: &str, error: &ToolError, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_execution_failure(tool_name, error, elapsed)
        }));
    }
}
