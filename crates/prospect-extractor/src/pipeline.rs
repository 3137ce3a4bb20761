//! Transcribe, extract and persist in one pass

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::extractor::OpportunityExtractor;
use crate::types::{ExtractionSummary, IngestRequest, IngestResult};
use prospect_domain::traits::{KeywordSuggester, OpportunityStore, Transcriber};
use prospect_domain::{Opportunity, RecordingId};
use std::fmt::Display;
use std::sync::{Arc, Mutex};
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Object-safe view of a [`KeywordSuggester`] with its error flattened
trait SuggestKeywords: Send + Sync {
    fn suggest(&self, transcript: &str) -> Result<Vec<String>, String>;
}

impl<K> SuggestKeywords for K
where
    K: KeywordSuggester + Send + Sync,
    K::Error: Display,
{
    fn suggest(&self, transcript: &str) -> Result<Vec<String>, String> {
        self.suggest_keywords(transcript).map_err(|e| e.to_string())
    }
}

/// Drives a recording from audio to stored opportunities
///
/// ```text
/// audio → Transcriber → transcript → OpportunityExtractor → OpportunityStore
/// ```
pub struct IngestPipeline<T, S>
where
    T: Transcriber,
    S: OpportunityStore,
{
    transcriber: Arc<T>,
    store: Arc<Mutex<S>>,
    suggester: Option<Arc<dyn SuggestKeywords>>,
    extractor: OpportunityExtractor,
    config: ExtractorConfig,
}

impl<T, S> IngestPipeline<T, S>
where
    T: Transcriber + Send + Sync + 'static,
    S: OpportunityStore,
    T::Error: Display,
    S::Error: Display,
{
    /// Create a new pipeline
    pub fn new(transcriber: T, store: S, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        Self::with_shared_store(transcriber, Arc::new(Mutex::new(store)), config)
    }

    /// Create a pipeline over a store that other components also hold
    pub fn with_shared_store(
        transcriber: T,
        store: Arc<Mutex<S>>,
        config: ExtractorConfig,
    ) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self {
            transcriber: Arc::new(transcriber),
            store,
            suggester: None,
            extractor: OpportunityExtractor::new(config.clone()),
            config,
        })
    }

    /// Ask `suggester` for keywords when a request carries none
    pub fn with_suggester<K>(mut self, suggester: K) -> Self
    where
        K: KeywordSuggester + Send + Sync + 'static,
        K::Error: Display,
    {
        self.suggester = Some(Arc::new(suggester));
        self
    }

    /// Handle to the underlying store
    pub fn store(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.store)
    }

    /// Transcribe the audio, then extract and persist opportunities
    pub async fn ingest(&self, request: IngestRequest) -> Result<IngestResult, ExtractorError> {
        info!(
            "Ingesting recording '{}' ({} bytes, {})",
            request.recording_id,
            request.audio.len(),
            request.mime_type
        );

        let transcript = timeout(
            self.config.transcription_timeout(),
            self.transcribe(request.audio, request.mime_type),
        )
        .await
        .map_err(|_| {
            warn!("Transcription of '{}' timed out", request.recording_id);
            ExtractorError::Timeout
        })??;

        debug!("Transcript length: {} chars", transcript.len());

        self.process_transcript(request.recording_id, transcript, request.keywords)
            .await
    }

    /// Extract and persist opportunities from an existing transcript
    pub async fn process_transcript(
        &self,
        recording_id: RecordingId,
        transcript: String,
        keywords: Vec<String>,
    ) -> Result<IngestResult, ExtractorError> {
        let keywords = if keywords.is_empty() {
            self.suggest_keywords(&transcript).await?
        } else {
            keywords
        };

        let opportunities: Vec<Opportunity> = self
            .extractor
            .extract(&transcript, &keywords)
            .into_iter()
            .map(|opp| opp.with_recording(recording_id.clone()))
            .collect();

        let ids = if opportunities.is_empty() {
            Vec::new()
        } else {
            let mut store = self
                .store
                .lock()
                .map_err(|e| ExtractorError::Store(format!("Store lock error: {}", e)))?;
            store
                .save_opportunities(&recording_id, &opportunities)
                .map_err(|e| ExtractorError::Store(e.to_string()))?
        };

        let summary = ExtractionSummary::from_opportunities(&opportunities);
        info!(
            "Recording '{}': {} opportunities across {} keywords",
            recording_id,
            summary.total(),
            keywords.len()
        );

        Ok(IngestResult {
            recording_id,
            transcript,
            keywords,
            opportunities,
            ids,
            summary,
        })
    }

    /// Call the transcriber off the async runtime
    async fn transcribe(&self, audio: Vec<u8>, mime_type: String) -> Result<String, ExtractorError> {
        let transcriber = Arc::clone(&self.transcriber);

        tokio::task::spawn_blocking(move || {
            transcriber
                .transcribe(&audio, &mime_type)
                .map_err(|e| ExtractorError::Transcription(e.to_string()))
        })
        .await
        .map_err(|e| ExtractorError::Transcription(format!("Task join error: {}", e)))?
    }

    /// Keywords from the suggester, or none when no suggester is attached
    async fn suggest_keywords(&self, transcript: &str) -> Result<Vec<String>, ExtractorError> {
        let Some(suggester) = self.suggester.as_ref().map(Arc::clone) else {
            debug!("No keywords given and no suggester attached");
            return Ok(Vec::new());
        };
        let transcript = transcript.to_string();

        let keywords = tokio::task::spawn_blocking(move || suggester.suggest(&transcript))
            .await
            .map_err(|e| ExtractorError::KeywordSuggestion(format!("Task join error: {}", e)))?
            .map_err(ExtractorError::KeywordSuggestion)?;

        debug!("Suggested keywords: {:?}", keywords);
        Ok(keywords)
    }
}
