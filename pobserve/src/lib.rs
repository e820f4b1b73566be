//! Production-friendly observability hooks for provider calls and tool dispatch.
//!
//! ```rust
//! use pobserve::{MetricsObservabilityHooks, SafeProviderHooks, TracingObservabilityHooks};
//!
//! let _provider_hooks = SafeProviderHooks::new(TracingObservabilityHooks);
//! let _metrics = MetricsObservabilityHooks;
//! ```

mod metrics_hooks;
mod safe_hooks;
mod standard;
mod tracing_hooks;

pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::{SafeProviderHooks, SafeToolHooks};
pub use standard::StandardObservabilityHooks;
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        MetricsObservabilityHooks, SafeProviderHooks, SafeToolHooks, StandardObservabilityHooks,
        TracingObservabilityHooks,
    };
}
