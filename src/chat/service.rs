//! The chat pipeline, independent of HTTP.
//!
//! ```text
//! question
//!   → validate (non-empty)
//!   → load knowledge base (blocking pool)
//!   → build prompt
//!   → one generation call
//!   → answer
//! ```

use std::sync::Arc;

use crate::error::{ChatError, INVALID_QUESTION};
use crate::knowledge::KnowledgeSource;
use crate::llms::BaseLLM;

use super::prompt::{build_prompt, system_instruction};

/// Stateless request/response pipeline. Shared across requests behind an
/// `Arc`; holds nothing mutable.
#[derive(Debug)]
pub struct ChatService {
    knowledge: Arc<dyn KnowledgeSource>,
    llm: Arc<dyn BaseLLM>,
    instruction: String,
}

impl ChatService {
    pub fn new(
        knowledge: Arc<dyn KnowledgeSource>,
        llm: Arc<dyn BaseLLM>,
        owner: &str,
    ) -> Self {
        Self {
            knowledge,
            llm,
            instruction: system_instruction(owner),
        }
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn llm(&self) -> &dyn BaseLLM {
        self.llm.as_ref()
    }

    /// Answer a single question.
    ///
    /// The knowledge base is loaded once and the model is called at most
    /// once. Nothing is retried.
    pub async fn answer(&self, question: &str) -> Result<String, ChatError> {
        if question.is_empty() {
            return Err(ChatError::BadRequest(INVALID_QUESTION.to_string()));
        }

        let source = Arc::clone(&self.knowledge);
        let knowledge = tokio::task::spawn_blocking(move || source.load())
            .await
            .map_err(|e| ChatError::Internal(format!("knowledge loader task failed: {}", e)))??;

        let prompt = build_prompt(&self.instruction, &knowledge, question);
        tracing::debug!(
            provider = self.llm.provider(),
            model = self.llm.model(),
            prompt_chars = prompt.len(),
            "calling generation service"
        );

        let answer = self.llm.generate(&prompt).await?;
        Ok(answer)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
