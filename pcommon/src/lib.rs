//! Shared utilities and strongly-typed common values for workspace crates.
//!
//! ```rust
//! use pcommon::{ConversationId, GenerationParams};
//!
//! let conversation = ConversationId::from("conv-1");
//! let params = GenerationParams::default().with_temperature(0.3).with_top_p(0.9);
//!
//! assert_eq!(conversation.as_str(), "conv-1");
//! assert_eq!(params.temperature, Some(0.3));
//! assert_eq!(params.max_tokens, None);
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use pcommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Cross-crate identifier newtypes.
    //!
    //! ```rust
    //! use pcommon::ConversationId;
    //!
    //! let id = ConversationId::new("conv-42");
    //! assert_eq!(id.to_string(), "conv-42");
    //! ```

    use std::borrow::Borrow;
    use std::fmt::{Display, Formatter};

    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ConversationId(String);

    impl ConversationId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }
    }

    impl Display for ConversationId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl Borrow<str> for ConversationId {
        fn borrow(&self) -> &str {
            self.0.as_str()
        }
    }

    impl From<String> for ConversationId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for ConversationId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }
}

pub mod model {
    //! Provider-neutral generation settings.
    //!
    //! Every field is optional; an absent field means "use the provider default".
    //!
    //! ```rust
    //! use pcommon::GenerationParams;
    //!
    //! let stored = GenerationParams::default().with_temperature(0.2).with_max_tokens(128);
    //! let call = GenerationParams::default().with_temperature(0.9);
    //!
    //! let merged = stored.overridden_by(&call);
    //! assert_eq!(merged.temperature, Some(0.9));
    //! assert_eq!(merged.max_tokens, Some(128));
    //! ```

    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
    pub struct GenerationParams {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub temperature: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub max_tokens: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub top_p: Option<f32>,
    }

    impl GenerationParams {
        pub fn with_temperature(mut self, temperature: f32) -> Self {
            self.temperature = Some(temperature);
            self
        }

        pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
            self.max_tokens = Some(max_tokens);
            self
        }

        pub fn with_top_p(mut self, top_p: f32) -> Self {
            self.top_p = Some(top_p);
            self
        }

        /// Field-wise merge where values present in `overrides` win.
        pub fn overridden_by(&self, overrides: &GenerationParams) -> GenerationParams {
            GenerationParams {
                temperature: overrides.temperature.or(self.temperature),
                max_tokens: overrides.max_tokens.or(self.max_tokens),
                top_p: overrides.top_p.or(self.top_p),
            }
        }

        pub fn is_empty(&self) -> bool {
            self.temperature.is_none() && self.max_tokens.is_none() && self.top_p.is_none()
        }
    }
}

pub mod registry {
    //! Generic registry map wrapper used by runtime registries.
    //!
    //! ```rust
    //! use pcommon::Registry;
    //!
    //! let mut registry = Registry::new();
    //! registry.insert("alpha".to_string(), 1_u32);
    //!
    //! assert_eq!(registry.get("alpha"), Some(&1));
    //! assert!(registry.contains_key("alpha"));
    //! ```

    use std::borrow::Borrow;
    use std::collections::HashMap;
    use std::hash::Hash;

    #[derive(Debug, Clone)]
    pub struct Registry<K, V> {
        items: HashMap<K, V>,
    }

    impl<K, V> Default for Registry<K, V>
    where
        K: Eq + Hash,
    {
        fn default() -> Self {
            Self {
                items: HashMap::new(),
            }
        }
    }

    impl<K, V> Registry<K, V>
    where
        K: Eq + Hash,
    {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn insert(&mut self, key: K, value: V) -> Option<V> {
            self.items.insert(key, value)
        }

        pub fn get<Q>(&self, key: &Q) -> Option<&V>
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.items.get(key)
        }

        pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.items.remove(key)
        }

        pub fn contains_key<Q>(&self, key: &Q) -> bool
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.items.contains_key(key)
        }

        pub fn keys(&self) -> impl Iterator<Item = &K> {
            self.items.keys()
        }

        pub fn values(&self) -> impl Iterator<Item = &V> {
            self.items.values()
        }

        pub fn len(&self) -> usize {
            self.items.len()
        }

        pub fn is_empty(&self) -> bool {
            self.items.is_empty()
        }
    }
}

pub use context::ConversationId;
pub use future::BoxFuture;
pub use model::GenerationParams;
pub use registry::Registry;
