//! Common `pprovider` imports for downstream crates.

pub use crate::{
    CostBreakdown, ErrorKind, GenerationCall, GenerationError, GenerationResult, GenerationSuccess, Generator,
    Message, ModelInfo, ModelProvider, ModelRequest, ModelResponse, NoopOperationHooks,
    ProviderCatalog, ProviderError, ProviderErrorKind, ProviderId, ProviderOperationHooks,
    ProviderRegistry, Role, StopReason, TokenUsage,
};
pub use pcommon::{BoxFuture, GenerationParams};
