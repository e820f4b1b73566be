use pchat::{ChatService, ConversationSummary, StartConversation};
use pprovider::GenerationParams;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
    Tool, ToolDefinition, ToolError, ToolFuture, decode_arguments, parse_provider, to_payload,
};

pub const CONVERSATION_TOOL: &str = "test_multiturn_conversation";

#[derive(Debug, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
enum ConversationArgs {
    Start {
        provider: String,
        model: String,
        system_prompt: String,
        user_prompt: String,
        #[serde(flatten)]
        params: GenerationParams,
    },
    Continue {
        conversation_id: String,
        user_prompt: String,
        #[serde(default)]
        system_prompt: Option<String>,
        #[serde(flatten)]
        params: GenerationParams,
    },
    Get {
        conversation_id: String,
    },
    List {},
    Close {
        conversation_id: String,
    },
}

#[derive(Debug, Serialize)]
struct ConversationList {
    conversations: Vec<ConversationSummary>,
}

/// Stateful multi-turn testing routed on the `mode` argument.
#[derive(Clone)]
pub struct ConversationTool {
    chat: ChatService,
}

impl ConversationTool {
    pub fn new(chat: ChatService) -> Self {
        Self { chat }
    }

    async fn run(&self, arguments: Value) -> Result<Value, ToolError> {
        match decode_arguments(arguments)? {
            ConversationArgs::Start {
                provider,
                model,
                system_prompt,
                user_prompt,
                params,
            } => {
                let provider = parse_provider(&provider)?;
                let request = StartConversation::new(provider, model, system_prompt, user_prompt)
                    .with_params(params);
                to_payload(&self.chat.start(request).await?)
            }
            ConversationArgs::Continue {
                conversation_id,
                user_prompt,
                system_prompt,
                params,
            } => {
                if system_prompt.is_some() {
                    tracing::warn!(
                        conversation_id = %conversation_id,
                        "system_prompt is ignored when continuing a conversation"
                    );
                }
                let outcome = self
                    .chat
                    .continue_conversation(&conversation_id, user_prompt, params)
                    .await?;
                to_payload(&outcome)
            }
            ConversationArgs::Get { conversation_id } => {
                to_payload(&self.chat.get(&conversation_id).await?)
            }
            ConversationArgs::List {} => to_payload(&ConversationList {
                conversations: self.chat.list().await?,
            }),
            ConversationArgs::Close { conversation_id } => {
                to_payload(&self.chat.close(&conversation_id).await?)
            }
        }
    }
}

impl Tool for ConversationTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            CONVERSATION_TOOL,
            "Run a multi-turn conversation with one provider and model. Use mode 'start' to \
             open it, 'continue' to add a turn, 'get' to read the history, 'list' to see open \
             conversations and 'close' to end one.",
            json!({
                "type": "object",
                "properties": {
                    "mode": {
                        "type": "string",
                        "enum": ["start", "continue", "get", "list", "close"],
                    },
                    "conversation_id": {
                        "type": "string",
                        "description": "Required for continue, get and close",
                    },
                    "provider": {
                        "type": "string",
                        "enum": ["openai", "anthropic"],
                        "description": "Required for start",
                    },
                    "model": { "type": "string", "description": "Required for start" },
                    "system_prompt": { "type": "string", "description": "Required for start" },
                    "user_prompt": {
                        "type": "string",
                        "description": "Required for start and continue",
                    },
                    "temperature": { "type": "number", "minimum": 0 },
                    "max_tokens": { "type": "integer", "minimum": 1 },
                    "top_p": { "type": "number", "minimum": 0, "maximum": 1 },
                },
                "required": ["mode"],
            }),
        )
    }

    fn invoke<'a>(&'a self, arguments: Value) -> ToolFuture<'a, Result<Value, ToolError>> {
        Box::pin(self.run(arguments))
    }
}
