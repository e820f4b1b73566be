//! Provider catalog, adapters and the single-call generation boundary.
//!
//! ```rust
//! use pprovider::{Message, ModelRequest, ProviderCatalog, ProviderId};
//!
//! let catalog = ProviderCatalog::builtin();
//! let info = catalog
//!     .model(ProviderId::Anthropic, "claude-3-5-haiku-20241022")
//!     .expect("catalog model");
//!
//! let request = ModelRequest::new(info.id, vec![Message::user("Say hi")])
//!     .with_sampling(info.supports_sampling);
//! assert!(request.validate().is_ok());
//! ```

pub mod adapters;
pub mod catalog;
mod credentials;
mod error;
mod generation;
mod hooks;
mod model;
mod provider;
mod registry;

pub mod prelude;

pub use catalog::{
    CostBreakdown, CostRates, ModelInfo, ModelTier, PRICE_CURRENCY, ProviderCatalog,
};
pub use credentials::{SecretString, SecureCredentialManager};
pub use error::{ErrorKind, GenerationError, INTERNAL_ERROR_MESSAGE, ProviderError, ProviderErrorKind};
pub use generation::{
    DEFAULT_REQUEST_TIMEOUT, GenerationCall, GenerationResult, GenerationSuccess, Generator,
    generate,
};
pub use hooks::{NoopOperationHooks, ProviderOperationHooks};
pub use model::{Message, ModelRequest, ModelResponse, ProviderId, Role, StopReason, TokenUsage};
pub use pcommon::{BoxFuture, GenerationParams};
pub use provider::{ModelProvider, ProviderFuture};
pub use registry::ProviderRegistry;
