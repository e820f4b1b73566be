//! Built-in provider and model catalog with pricing and parameter ranges.
//!
//! Costs are USD per one million tokens.
//!
//! ```rust
//! use pcommon::GenerationParams;
//! use pprovider::{ProviderCatalog, ProviderId};
//!
//! let catalog = ProviderCatalog::builtin();
//! assert!(catalog.validate(ProviderId::OpenAi, "gpt-4o"));
//! assert!(!catalog.validate(ProviderId::Anthropic, "gpt-4o"));
//!
//! let too_hot = GenerationParams::default().with_temperature(1.5);
//! assert!(catalog.validate_params(ProviderId::OpenAi, &too_hot).is_ok());
//! assert!(catalog.validate_params(ProviderId::Anthropic, &too_hot).is_err());
//! ```

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use pcommon::GenerationParams;
use serde::{Deserialize, Serialize};

use crate::{GenerationError, ProviderId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    Fast,
    Balanced,
    Smart,
    Vision,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub tier: ModelTier,
    pub input_cost: f64,
    pub output_cost: f64,
    pub description: &'static str,
    pub supports_sampling: bool,
}

impl ModelInfo {
    pub fn estimate_cost(&self, input_tokens: u32, output_tokens: u32) -> f64 {
        self.cost_breakdown(input_tokens, output_tokens).total_cost
    }

    pub fn cost_breakdown(&self, input_tokens: u32, output_tokens: u32) -> CostBreakdown {
        let input_cost = f64::from(input_tokens) * self.input_cost / 1_000_000.0;
        let output_cost = f64::from(output_tokens) * self.output_cost / 1_000_000.0;
        CostBreakdown {
            input_cost,
            output_cost,
            total_cost: input_cost + output_cost,
            currency: PRICE_CURRENCY.to_string(),
            rates: CostRates {
                input_rate: self.input_cost,
                output_rate: self.output_cost,
            },
        }
    }
}

/// Catalog prices are USD per one million tokens.
pub const PRICE_CURRENCY: &str = "USD";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
    pub currency: String,
    pub rates: CostRates,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostRates {
    pub input_rate: f64,
    pub output_rate: f64,
}

const OPENAI_MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "gpt-4o-mini",
        name: "GPT-4o mini",
        tier: ModelTier::Fast,
        input_cost: 0.15,
        output_cost: 0.60,
        description: "Fast and cost-effective model for most use cases",
        supports_sampling: true,
    },
    ModelInfo {
        id: "o1-mini",
        name: "o1-mini",
        tier: ModelTier::Smart,
        input_cost: 1.10,
        output_cost: 4.40,
        description: "Advanced reasoning capabilities with superior performance",
        supports_sampling: false,
    },
    ModelInfo {
        id: "gpt-4o",
        name: "GPT-4o",
        tier: ModelTier::Vision,
        input_cost: 2.50,
        output_cost: 10.00,
        description: "Multimodal model that can process images and text",
        supports_sampling: true,
    },
];

const ANTHROPIC_MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "claude-3-5-haiku-20241022",
        name: "Claude 3.5 Haiku",
        tier: ModelTier::Fast,
        input_cost: 0.80,
        output_cost: 4.00,
        description: "Fastest Claude model with strong reasoning capabilities",
        supports_sampling: true,
    },
    ModelInfo {
        id: "claude-3-5-sonnet-20240620",
        name: "Claude 3.5 Sonnet",
        tier: ModelTier::Balanced,
        input_cost: 3.00,
        output_cost: 15.00,
        description: "Balanced performance and quality with strong reasoning",
        supports_sampling: true,
    },
    ModelInfo {
        id: "claude-3-opus-20240229",
        name: "Claude 3 Opus",
        tier: ModelTier::Smart,
        input_cost: 15.00,
        output_cost: 75.00,
        description: "Most powerful Claude model with superior reasoning",
        supports_sampling: true,
    },
];

#[derive(Debug, Clone)]
pub struct ProviderCatalog {
    providers: BTreeMap<ProviderId, Vec<ModelInfo>>,
}

impl Default for ProviderCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ProviderCatalog {
    pub fn builtin() -> Self {
        let mut providers = BTreeMap::new();
        providers.insert(ProviderId::OpenAi, OPENAI_MODELS.to_vec());
        providers.insert(ProviderId::Anthropic, ANTHROPIC_MODELS.to_vec());
        Self { providers }
    }

    pub fn list_providers(&self) -> &BTreeMap<ProviderId, Vec<ModelInfo>> {
        &self.providers
    }

    pub fn models(&self, provider: ProviderId) -> &[ModelInfo] {
        self.providers
            .get(&provider)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn model(&self, provider: ProviderId, model: &str) -> Option<&ModelInfo> {
        self.models(provider).iter().find(|info| info.id == model)
    }

    pub fn validate(&self, provider: ProviderId, model: &str) -> bool {
        self.model(provider, model).is_some()
    }

    pub fn temperature_range(provider: ProviderId) -> RangeInclusive<f32> {
        match provider {
            ProviderId::OpenAi => 0.0..=2.0,
            ProviderId::Anthropic => 0.0..=1.0,
        }
    }

    pub fn validate_params(
        &self,
        provider: ProviderId,
        params: &GenerationParams,
    ) -> Result<(), GenerationError> {
        if let Some(temperature) = params.temperature {
            let range = Self::temperature_range(provider);
            if !range.contains(&temperature) {
                return Err(GenerationError::validation(format!(
                    "temperature for {provider} must be between {} and {}, got {temperature}",
                    range.start(),
                    range.end()
                )));
            }
        }

        if let Some(top_p) = params.top_p
            && !(0.0..=1.0).contains(&top_p)
        {
            return Err(GenerationError::validation(format!(
                "top_p must be between 0 and 1, got {top_p}"
            )));
        }

        if params.max_tokens == Some(0) {
            return Err(GenerationError::validation(
                "max_tokens must be at least 1",
            ));
        }

        Ok(())
    }

    /// Resolves a model and checks its parameters in one step.
    pub fn check(
        &self,
        provider: ProviderId,
        model: &str,
        params: &GenerationParams,
    ) -> Result<&ModelInfo, GenerationError> {
        let info = self.model(provider, model).ok_or_else(|| {
            GenerationError::validation(format!(
                "unknown model '{model}' for provider {provider}"
            ))
        })?;
        self.validate_params(provider, params)?;
        Ok(info)
    }
}
