//! Question answering over a transcript

use crate::prompt::AnswerPrompt;
use crate::LlmError;
use prospect_domain::traits::{AnswerService, LlmProvider};
use std::fmt::Display;
use tracing::{debug, warn};

/// Answers questions about a transcript with an injected LLM provider
pub struct LlmAnswerService<L: LlmProvider> {
    provider: L,
}

impl<L> LlmAnswerService<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create a new answer service
    pub fn new(provider: L) -> Self {
        Self { provider }
    }

    /// The wrapped provider
    pub fn provider(&self) -> &L {
        &self.provider
    }
}

impl<L> AnswerService for LlmAnswerService<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    type Error = LlmError;

    fn answer(&self, question: &str, context: &str, keywords: &[String]) -> Result<String, Self::Error> {
        if question.trim().is_empty() {
            return Err(LlmError::InvalidRequest("Question cannot be empty".to_string()));
        }

        let prompt = AnswerPrompt::new(question, context, keywords).build();
        debug!("Answer prompt length: {} chars", prompt.len());

        let response = self.provider.generate(&prompt).map_err(|e| {
            warn!("Answer generation failed: {}", e);
            LlmError::Communication(e.to_string())
        })?;

        let answer = response.trim();
        if answer.is_empty() {
            return Err(LlmError::InvalidResponse("Model returned an empty answer".to_string()));
        }
        Ok(answer.to_string())
    }
}
