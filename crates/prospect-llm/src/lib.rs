//! Prospect LLM Layer
//!
//! Language-model backed collaborators for the extraction pipeline.
//!
//! # Architecture
//!
//! Everything here is generic over the `LlmProvider` trait from
//! `prospect-domain`, so a concrete model client is injected by the caller.
//!
//! # Components
//!
//! - `MockProvider`: Deterministic provider and transcriber for tests and demos
//! - `LlmAnswerService`: Answers questions about a transcript
//! - `LlmKeywordSuggester`: Proposes keywords to scan a transcript for
//!
//! # Examples
//!
//! ```
//! use prospect_llm::MockProvider;
//! use prospect_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt").unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod answer;
pub mod keywords;
mod parser;
mod prompt;

use prospect_domain::traits::{LlmProvider, Transcriber};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

pub use answer::LlmAnswerService;
pub use keywords::LlmKeywordSuggester;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Caller sent something the service cannot act on
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Marker stored in place of a response to make a prompt fail
const ERROR_MARKER: &str = "ERROR";

/// Mock LLM provider and transcriber for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
///
/// # Examples
///
/// ```
/// use prospect_llm::MockProvider;
/// use prospect_domain::traits::{LlmProvider, Transcriber};
///
/// let mut provider = MockProvider::new("fallback").with_transcript("hello there");
/// provider.add_response("prompt1", "response1");
///
/// assert_eq!(provider.generate("prompt1").unwrap(), "response1");
/// assert_eq!(provider.generate("other").unwrap(), "fallback");
/// assert_eq!(provider.transcribe(b"RIFF", "audio/wav").unwrap(), "hello there");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, String>>>,
    call_count: Arc<Mutex<usize>>,
    transcript: Option<String>,
    transcription_error: Option<String>,
    delay: Option<Duration>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            transcript: None,
            transcription_error: None,
            delay: None,
        }
    }

    /// Transcript returned by [`Transcriber::transcribe`]
    ///
    /// Without one, transcription returns the default response.
    pub fn with_transcript(mut self, transcript: impl Into<String>) -> Self {
        self.transcript = Some(transcript.into());
        self
    }

    /// Make every transcription fail with `message`
    pub fn with_transcription_error(mut self, message: impl Into<String>) -> Self {
        self.transcription_error = Some(message.into());
        self
    }

    /// Sleep this long before every call
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(prompt.into(), response.into());
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        self.add_response(prompt, ERROR_MARKER);
    }

    /// Get the number of calls made (generation and transcription)
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap_or_else(|e| e.into_inner()) = 0;
    }

    fn record_call(&self) {
        *self.call_count.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        self.record_call();

        let responses = self
            .responses
            .lock()
            .map_err(|e| LlmError::Other(format!("Mock state poisoned: {}", e)))?;
        match responses.get(prompt) {
            Some(response) if response == ERROR_MARKER => Err(LlmError::Other("Mock error".to_string())),
            Some(response) => Ok(response.clone()),
            None => Ok(self.default_response.clone()),
        }
    }
}

impl Transcriber for MockProvider {
    type Error = LlmError;

    fn transcribe(&self, audio: &[u8], mime_type: &str) -> Result<String, Self::Error> {
        self.record_call();

        if let Some(message) = &self.transcription_error {
            return Err(LlmError::Communication(message.clone()));
        }
        if audio.is_empty() {
            return Err(LlmError::InvalidRequest(format!("Empty {} upload", mime_type)));
        }
        Ok(self
            .transcript
            .clone()
            .unwrap_or_else(|| self.default_response.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        assert_eq!(provider.generate("any prompt").unwrap(), "Test response");
    }

    #[test]
    fn test_mock_provider_specific_responses() {
        let mut provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.generate("hello").unwrap(), "world");
        assert_eq!(provider.generate("foo").unwrap(), "bar");
        assert_eq!(provider.generate("unknown").unwrap(), "Default mock response");
    }

    #[test]
    fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test").with_transcript("words");
        assert_eq!(provider.call_count(), 0);

        provider.generate("prompt1").unwrap();
        provider.transcribe(b"x", "audio/wav").unwrap();
        assert_eq!(provider.call_count(), 2);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_mock_provider_error() {
        let mut provider = MockProvider::default();
        provider.add_error("bad prompt");

        let result = provider.generate("bad prompt");
        assert!(matches!(result, Err(LlmError::Other(_))));
    }

    #[test]
    fn test_mock_transcription() {
        let provider = MockProvider::new("fallback");
        assert_eq!(provider.transcribe(b"abc", "audio/mpeg").unwrap(), "fallback");

        let provider = provider.with_transcript("we discussed the budget");
        assert_eq!(
            provider.transcribe(b"abc", "audio/mpeg").unwrap(),
            "we discussed the budget"
        );
    }

    #[test]
    fn test_mock_transcription_errors() {
        let provider = MockProvider::default().with_transcription_error("quota exceeded");
        assert!(matches!(
            provider.transcribe(b"abc", "audio/wav"),
            Err(LlmError::Communication(_))
        ));

        let provider = MockProvider::default();
        assert!(matches!(
            provider.transcribe(&[], "audio/wav"),
            Err(LlmError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_mock_provider_clone_shares_state() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate("test").unwrap();

        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
