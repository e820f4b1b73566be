use futures_util::future::join_all;
use pprovider::{GenerationCall, GenerationParams, Generator, Message};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
    Tool, ToolDefinition, ToolError, ToolFuture, decode_arguments, parse_provider, require_text,
    to_payload,
};

pub const COMPARISON_TOOL: &str = "test_comparison";

pub const MAX_COMPARISONS: usize = 4;

#[derive(Debug, Deserialize)]
struct ComparisonArgs {
    comparisons: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ComparisonEntry {
    provider: String,
    model: String,
    system_prompt: String,
    user_prompt: String,
    #[serde(flatten)]
    params: GenerationParams,
}

#[derive(Debug, Serialize)]
struct ComparisonOutput {
    results: Vec<pprovider::GenerationResult>,
}

/// Runs 1 to 4 independent single-turn generations side by side.
#[derive(Clone)]
pub struct ComparisonTool {
    generator: Generator,
}

impl ComparisonTool {
    pub fn new(generator: Generator) -> Self {
        Self { generator }
    }

    fn prepare(&self, entry: Value) -> Result<GenerationCall, ToolError> {
        let entry: ComparisonEntry = decode_arguments(entry)?;
        let provider = parse_provider(&entry.provider)?;
        require_text("system_prompt", &entry.system_prompt)?;
        require_text("user_prompt", &entry.user_prompt)?;
        self.generator
            .validate(provider, &entry.model, &entry.params)?;

        Ok(GenerationCall::new(
            provider,
            entry.model,
            vec![
                Message::system(entry.system_prompt),
                Message::user(entry.user_prompt),
            ],
        )
        .with_params(entry.params))
    }

    async fn compare(&self, arguments: Value) -> Result<Value, ToolError> {
        let args: ComparisonArgs = decode_arguments(arguments)?;
        let count = args.comparisons.len();
        if !(1..=MAX_COMPARISONS).contains(&count) {
            return Err(ToolError::invalid_arguments(format!(
                "comparisons must contain between 1 and {MAX_COMPARISONS} entries, got {count}"
            )));
        }

        let calls = args
            .comparisons
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                self.prepare(entry)
                    .map_err(|error| error.at(format!("comparisons[{index}]")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let results = join_all(calls.into_iter().map(|call| self.generator.generate(call))).await;
        tracing::debug!(
            entries = results.len(),
            failed = results.iter().filter(|result| !result.is_success()).count(),
            "comparison finished"
        );

        to_payload(&ComparisonOutput { results })
    }
}

impl Tool for ComparisonTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            COMPARISON_TOOL,
            "Compare up to four prompt configurations side by side. Each entry may use a \
             different provider, model and sampling parameters; results keep the input order.",
            json!({
                "type": "object",
                "properties": {
                    "comparisons": {
                        "type": "array",
                        "minItems": 1,
                        "maxItems": MAX_COMPARISONS,
                        "items": entry_schema(),
                    }
                },
                "required": ["comparisons"],
            }),
        )
    }

    fn invoke<'a>(&'a self, arguments: Value) -> ToolFuture<'a, Result<Value, ToolError>> {
        Box::pin(self.compare(arguments))
    }
}

fn entry_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "provider": {
                "type": "string",
                "enum": ["openai", "anthropic"],
                "description": "Provider to call",
            },
            "model": { "type": "string", "description": "Model identifier from list_providers" },
            "system_prompt": { "type": "string" },
            "user_prompt": { "type": "string" },
            "temperature": { "type": "number", "minimum": 0 },
            "max_tokens": { "type": "integer", "minimum": 1 },
            "top_p": { "type": "number", "minimum": 0, "maximum": 1 },
        },
        "required": ["provider", "model", "system_prompt", "user_prompt"],
    })
}
