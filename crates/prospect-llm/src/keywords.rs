//! Keyword suggestion from a transcript

use crate::parser::parse_keyword_response;
use crate::prompt::KeywordPrompt;
use crate::LlmError;
use prospect_domain::traits::{KeywordSuggester, LlmProvider};
use std::fmt::Display;
use tracing::debug;

/// Default cap on suggested keywords
pub const DEFAULT_MAX_KEYWORDS: usize = 20;

/// Proposes keywords by asking an injected LLM provider
pub struct LlmKeywordSuggester<L: LlmProvider> {
    provider: L,
    max_keywords: usize,
}

impl<L> LlmKeywordSuggester<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create a new suggester with the default cap
    pub fn new(provider: L) -> Self {
        Self {
            provider,
            max_keywords: DEFAULT_MAX_KEYWORDS,
        }
    }

    /// Set the maximum number of keywords returned
    pub fn with_max_keywords(mut self, max_keywords: usize) -> Self {
        self.max_keywords = max_keywords;
        self
    }
}

impl<L> KeywordSuggester for LlmKeywordSuggester<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    type Error = LlmError;

    fn suggest_keywords(&self, transcript: &str) -> Result<Vec<String>, Self::Error> {
        if transcript.trim().is_empty() {
            return Ok(Vec::new());
        }

        let prompt = KeywordPrompt::new(transcript, self.max_keywords).build();
        let response = self
            .provider
            .generate(&prompt)
            .map_err(|e| LlmError::Communication(e.to_string()))?;

        let keywords = parse_keyword_response(&response, self.max_keywords)?;
        debug!("Suggested {} keywords", keywords.len());
        Ok(keywords)
    }
}
