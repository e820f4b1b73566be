//! Single-call generation boundary that turns every provider outcome into data.
//!
//! Each call makes exactly one outbound request, bounded by a timeout. Provider
//! failures, timeouts and adapter panics all come back as
//! [`GenerationResult::Error`]; nothing escapes as a fault.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use pprovider::{
//!     GenerationCall, GenerationResult, Generator, Message, ProviderCatalog, ProviderId,
//!     ProviderRegistry,
//! };
//!
//! let generator = Generator::new(
//!     Arc::new(ProviderRegistry::new()),
//!     Arc::new(ProviderCatalog::builtin()),
//! );
//!
//! let call = GenerationCall::new(
//!     ProviderId::OpenAi,
//!     "gpt-4o",
//!     vec![Message::user("hi")],
//! );
//! let runtime = tokio::runtime::Builder::new_current_thread()
//!     .enable_time()
//!     .build()
//!     .expect("runtime should build");
//!
//! // No provider is registered, so the call reports an authentication error.
//! let result = runtime.block_on(generator.generate(call));
//! assert!(matches!(result, GenerationResult::Error(_)));
//! ```

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::FutureExt;
use pcommon::GenerationParams;
use serde::{Deserialize, Serialize};

use crate::{
    CostBreakdown, GenerationError, Message, ModelInfo, ModelProvider, ModelRequest, ModelResponse,
    NoopOperationHooks, ProviderCatalog, ProviderErrorKind, ProviderId, ProviderOperationHooks,
    ProviderRegistry, StopReason, TokenUsage,
};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSuccess {
    pub text: String,
    pub provider: ProviderId,
    pub model: String,
    pub usage: TokenUsage,
    pub estimated_cost: f64,
    pub costs: CostBreakdown,
    pub stop_reason: StopReason,
    pub response_time_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationResult {
    Success(GenerationSuccess),
    Error(GenerationError),
}

impl GenerationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn success(&self) -> Option<&GenerationSuccess> {
        match self {
            Self::Success(success) => Some(success),
            Self::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&GenerationError> {
        match self {
            Self::Success(_) => None,
            Self::Error(error) => Some(error),
        }
    }
}

impl From<GenerationError> for GenerationResult {
    fn from(value: GenerationError) -> Self {
        Self::Error(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationCall {
    pub provider: ProviderId,
    pub model: String,
    pub messages: Vec<Message>,
    pub params: GenerationParams,
}

impl GenerationCall {
    pub fn new(provider: ProviderId, model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            provider,
            model: model.into(),
            messages,
            params: GenerationParams::default(),
        }
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }
}

/// Runs one provider call with a deadline and maps every outcome into a result.
pub async fn generate(
    provider: &dyn ModelProvider,
    model: &ModelInfo,
    request: ModelRequest,
    timeout: Duration,
    hooks: &dyn ProviderOperationHooks,
) -> GenerationResult {
    let provider_id = provider.id();
    let model_id = request.model.clone();

    hooks.on_call_start(provider_id, &model_id);
    let started = Instant::now();
    let outcome = tokio::time::timeout(
        timeout,
        AssertUnwindSafe(async move { provider.complete(request).await }).catch_unwind(),
    )
    .await;
    let elapsed = started.elapsed();

    let response = match outcome {
        Ok(Ok(Ok(response))) => Ok(response),
        Ok(Ok(Err(error))) => {
            if matches!(
                error.kind,
                ProviderErrorKind::InvalidResponse | ProviderErrorKind::Other
            ) {
                tracing::error!(
                    provider = %provider_id,
                    model = %model_id,
                    error = %error,
                    "provider response could not be translated"
                );
            }
            Err(GenerationError::from(error))
        }
        Ok(Err(panic)) => {
            tracing::error!(
                provider = %provider_id,
                model = %model_id,
                panic = %panic_message(panic.as_ref()),
                "provider adapter panicked"
            );
            Err(GenerationError::internal())
        }
        Err(_) => Err(GenerationError::provider(
            ProviderErrorKind::Timeout,
            format!(
                "{provider_id} did not respond within {} seconds",
                timeout.as_secs_f64()
            ),
        )),
    };

    match response {
        Ok(response) => {
            hooks.on_call_success(provider_id, &model_id, &response, elapsed);
            GenerationResult::Success(success_from(response, model, model_id, elapsed))
        }
        Err(error) => {
            hooks.on_call_failure(provider_id, &model_id, &error, elapsed);
            GenerationResult::Error(error)
        }
    }
}

fn success_from(
    response: ModelResponse,
    model: &ModelInfo,
    model_id: String,
    elapsed: Duration,
) -> GenerationSuccess {
    let costs = model.cost_breakdown(response.usage.input_tokens, response.usage.output_tokens);
    GenerationSuccess {
        estimated_cost: costs.total_cost,
        costs,
        text: response.text,
        provider: response.provider,
        model: model_id,
        usage: response.usage,
        stop_reason: response.stop_reason,
        response_time_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Catalog-aware front door: validates, resolves the adapter, then calls [`generate`].
#[derive(Clone)]
pub struct Generator {
    registry: Arc<ProviderRegistry>,
    catalog: Arc<ProviderCatalog>,
    timeout: Duration,
    hooks: Arc<dyn ProviderOperationHooks>,
}

impl Generator {
    pub fn new(registry: Arc<ProviderRegistry>, catalog: Arc<ProviderCatalog>) -> Self {
        Self {
            registry,
            catalog,
            timeout: DEFAULT_REQUEST_TIMEOUT,
            hooks: Arc::new(NoopOperationHooks),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ProviderOperationHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn catalog(&self) -> &ProviderCatalog {
        &self.catalog
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn validate(
        &self,
        provider: ProviderId,
        model: &str,
        params: &GenerationParams,
    ) -> Result<(), GenerationError> {
        self.catalog.check(provider, model, params).map(|_| ())
    }

    pub async fn generate(&self, call: GenerationCall) -> GenerationResult {
        let info = match self.catalog.check(call.provider, &call.model, &call.params) {
            Ok(info) => info,
            Err(error) => return error.into(),
        };

        let Some(provider) = self.registry.get(call.provider) else {
            return GenerationError::provider(
                ProviderErrorKind::Authentication,
                format!("no {} API key configured", call.provider),
            )
            .into();
        };

        let request = ModelRequest::new(call.model, call.messages)
            .with_params(call.params)
            .with_sampling(info.supports_sampling);
        if let Err(error) = request.validate() {
            return GenerationError::validation(error.message).into();
        }

        generate(
            provider.as_ref(),
            info,
            request,
            self.timeout,
            self.hooks.as_ref(),
        )
        .await
    }
}
