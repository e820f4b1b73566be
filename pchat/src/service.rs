//! Multi-turn conversation service: start, continue, get, list and close.
//!
//! A conversation only exists once its first provider call succeeded. Later
//! turns run one at a time per conversation and mutate history only after the
//! provider call has resolved, so a cancelled turn leaves nothing behind.

use std::sync::Arc;

use chrono::Utc;
use pcommon::{ConversationId, GenerationParams};
use pprovider::{GenerationCall, GenerationResult, Generator, Message};
use uuid::Uuid;

use crate::{
    ChatError, CloseOutcome, ContinueOutcome, Conversation, ConversationHistory,
    ConversationStore, ConversationSummary, StartConversation, StartOutcome, TurnStats,
};

#[derive(Clone)]
pub struct ChatService {
    generator: Arc<Generator>,
    store: Arc<dyn ConversationStore>,
}

impl ChatService {
    pub fn new(generator: Arc<Generator>, store: Arc<dyn ConversationStore>) -> Self {
        Self { generator, store }
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub async fn start(&self, request: StartConversation) -> Result<StartOutcome, ChatError> {
        require_text("system_prompt", &request.system_prompt)?;
        require_text("user_prompt", &request.user_prompt)?;
        self.generator
            .validate(request.provider, &request.model, &request.params)?;

        let StartConversation {
            provider,
            model,
            system_prompt,
            user_prompt,
            params,
        } = request;

        let mut messages = vec![Message::system(system_prompt), Message::user(user_prompt)];
        let call = GenerationCall::new(provider, model.clone(), messages.clone()).with_params(params);
        let result = self.generator.generate(call).await;

        let Some(success) = result.success() else {
            tracing::debug!(provider = %provider, model = %model, "conversation not started");
            return Ok(StartOutcome {
                conversation_id: None,
                result,
            });
        };

        messages.push(Message::assistant(success.text.clone()));
        let id = ConversationId::new(Uuid::new_v4().to_string());
        let mut conversation = Conversation::new(id.clone(), provider, model, params, messages);
        conversation.last_turn = Some(TurnStats::from(success));
        self.store.insert(conversation).await?;

        tracing::info!(conversation_id = %id, provider = %provider, "conversation started");
        Ok(StartOutcome {
            conversation_id: Some(id),
            result,
        })
    }

    /// Runs one turn with `overrides` applied field by field over the start parameters.
    ///
    /// A failed provider call still records the user message.
    pub async fn continue_conversation(
        &self,
        conversation_id: &str,
        user_prompt: impl Into<String>,
        overrides: GenerationParams,
    ) -> Result<ContinueOutcome, ChatError> {
        let user_prompt = user_prompt.into();
        require_text("user_prompt", &user_prompt)?;

        let entry = self
            .store
            .get(conversation_id)
            .await?
            .ok_or_else(|| ChatError::not_found(conversation_id))?;

        let _turn = entry.begin_turn().await;
        if !self.store.contains(conversation_id).await? {
            return Err(ChatError::not_found(conversation_id));
        }

        let conversation = entry.snapshot()?;
        let params = conversation.params.overridden_by(&overrides);
        self.generator
            .validate(conversation.provider, &conversation.model, &params)?;

        let user_message = Message::user(user_prompt);
        let mut messages = conversation.messages;
        messages.push(user_message.clone());

        let call = GenerationCall::new(conversation.provider, conversation.model, messages)
            .with_params(params);
        let result = self.generator.generate(call).await;

        entry.update(|record| {
            record.messages.push(user_message);
            if let GenerationResult::Success(success) = &result {
                record.messages.push(Message::assistant(success.text.clone()));
                record.last_turn = Some(TurnStats::from(success));
            }
            record.updated_at = Utc::now();
        })?;

        if !result.is_success() {
            tracing::debug!(
                conversation_id = %conversation_id,
                "turn failed; user message kept in history"
            );
        }

        Ok(ContinueOutcome { result })
    }

    pub async fn get(&self, conversation_id: &str) -> Result<ConversationHistory, ChatError> {
        let entry = self
            .store
            .get(conversation_id)
            .await?
            .ok_or_else(|| ChatError::not_found(conversation_id))?;

        Ok(entry.snapshot()?.history())
    }

    pub async fn list(&self) -> Result<Vec<ConversationSummary>, ChatError> {
        self.store
            .list()
            .await?
            .iter()
            .map(|entry| entry.snapshot().map(|conversation| conversation.summary()))
            .collect()
    }

    pub async fn close(&self, conversation_id: &str) -> Result<CloseOutcome, ChatError> {
        let removed = self.store.remove(conversation_id).await?;
        let Some(entry) = removed else {
            return Err(ChatError::not_found(conversation_id));
        };

        let conversation_id = entry.snapshot()?.id;
        tracing::info!(conversation_id = %conversation_id, "conversation closed");
        Ok(CloseOutcome {
            conversation_id,
            closed: true,
        })
    }
}

fn require_text(field: &str, value: &str) -> Result<(), ChatError> {
    if value.trim().is_empty() {
        return Err(ChatError::invalid_request(format!(
            "{field} must not be empty"
        )));
    }

    Ok(())
}
