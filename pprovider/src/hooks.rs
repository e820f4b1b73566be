//! Operational hook contracts around single provider calls.

use std::time::Duration;

use crate::{GenerationError, ModelResponse, ProviderId};

pub trait ProviderOperationHooks: Send + Sync {
    fn on_call_start(&self, _provider: ProviderId, _model: &str) {}

    fn on_call_success(
        &self,
        _provider: ProviderId,
        _model: &str,
        _response: &ModelResponse,
        _elapsed: Duration,
    ) {
    }

    fn on_call_failure(
        &self,
        _provider: ProviderId,
        _model: &str,
        _error: &GenerationError,
        _elapsed: Duration,
    ) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOperationHooks;

impl ProviderOperationHooks for NoopOperationHooks {}
