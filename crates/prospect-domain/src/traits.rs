//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Implementations are constructed explicitly and handed to whoever needs
//! them; nothing here is a process-wide singleton.

use crate::{Opportunity, OpportunityId, OpportunityUpdate, RecordingId};

/// Trait for persisting opportunities
///
/// Implemented by the infrastructure layer (prospect-store)
pub trait OpportunityStore {
    /// Error type for store operations
    type Error;

    /// Persist a batch of opportunities under a recording
    ///
    /// Returns the durable ids in input order.
    fn save_opportunities(
        &mut self,
        recording: &RecordingId,
        opportunities: &[Opportunity],
    ) -> Result<Vec<OpportunityId>, Self::Error>;

    /// List the opportunities of a recording in insertion order
    fn list_opportunities(&self, recording: &RecordingId) -> Result<Vec<Opportunity>, Self::Error>;

    /// Get an opportunity by id
    fn get_opportunity(&self, id: OpportunityId) -> Result<Option<Opportunity>, Self::Error>;

    /// Change status, priority or notes
    ///
    /// Returns `false` when no opportunity has this id.
    fn update_opportunity(
        &mut self,
        id: OpportunityId,
        update: &OpportunityUpdate,
    ) -> Result<bool, Self::Error>;

    /// Delete an opportunity
    ///
    /// Returns `false` when no opportunity has this id.
    fn delete_opportunity(&mut self, id: OpportunityId) -> Result<bool, Self::Error>;
}

/// A stored audio blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioEntry {
    /// Filename the blob is stored under
    pub filename: String,

    /// Hex content hash supplied at save time
    pub content_hash: String,

    /// Size in bytes
    pub size: u64,
}

/// Outcome of saving an audio blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioSaveOutcome {
    /// Blob was written
    Saved(AudioEntry),

    /// A blob with the same content hash already exists
    Duplicate {
        /// The entry already holding this content
        existing: AudioEntry,
    },
}

/// Trait for storing raw audio blobs
///
/// Implemented by the infrastructure layer (prospect-store)
pub trait AudioStore {
    /// Error type for audio operations
    type Error;

    /// Save a blob under `filename` unless its hash is already stored
    fn save_audio(
        &mut self,
        filename: &str,
        bytes: &[u8],
        content_hash: &str,
    ) -> Result<AudioSaveOutcome, Self::Error>;

    /// List stored blobs sorted by filename
    fn list_audio(&self) -> Result<Vec<AudioEntry>, Self::Error>;

    /// Delete a blob; returns `false` if it did not exist
    fn delete_audio(&mut self, filename: &str) -> Result<bool, Self::Error>;
}

/// Trait for speech-to-text services
pub trait Transcriber {
    /// Error type for transcription
    type Error;

    /// Transcribe audio bytes of the given mime type
    fn transcribe(&self, audio: &[u8], mime_type: &str) -> Result<String, Self::Error>;
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (prospect-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;
}

/// Trait for answering questions about a transcript
pub trait AnswerService {
    /// Error type for answering
    type Error;

    /// Answer `question` using `context` and the user's keywords
    fn answer(&self, question: &str, context: &str, keywords: &[String]) -> Result<String, Self::Error>;
}

/// Trait for proposing keywords from a transcript
///
/// Runs upstream of the opportunity extractor when the user gave none.
pub trait KeywordSuggester {
    /// Error type for suggestion
    type Error;

    /// Suggest short keywords found in the transcript
    fn suggest_keywords(&self, transcript: &str) -> Result<Vec<String>, Self::Error>;
}
