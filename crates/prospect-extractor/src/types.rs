//! Request and response types for ingestion

use prospect_domain::{Opportunity, OpportunityId, RecordingId};

/// Request to transcribe a recording and extract its opportunities
#[derive(Debug, Clone)]
pub struct IngestRequest {
    /// Recording the opportunities belong to
    pub recording_id: RecordingId,

    /// Raw audio bytes
    pub audio: Vec<u8>,

    /// Mime type of the audio (e.g. "audio/wav")
    pub mime_type: String,

    /// Keywords to scan for; empty asks the keyword suggester, if any
    pub keywords: Vec<String>,
}

/// Result of an ingest run
#[derive(Debug, Clone)]
pub struct IngestResult {
    /// Recording the opportunities were stored under
    pub recording_id: RecordingId,

    /// Transcript the opportunities were extracted from
    pub transcript: String,

    /// Keywords actually scanned for
    pub keywords: Vec<String>,

    /// Extracted opportunities, in extraction order
    pub opportunities: Vec<Opportunity>,

    /// Durable ids returned by the store, in the same order
    pub ids: Vec<OpportunityId>,

    /// Per-keyword hit counts
    pub summary: ExtractionSummary,
}

/// Per-keyword hit counts for a batch of opportunities
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    counts: Vec<(String, usize)>,
}

impl ExtractionSummary {
    /// Count hits per keyword, keeping first-appearance order
    pub fn from_opportunities(opportunities: &[Opportunity]) -> Self {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for opp in opportunities {
            match counts.iter_mut().find(|(k, _)| *k == opp.keyword) {
                Some((_, n)) => *n += 1,
                None => counts.push((opp.keyword.clone(), 1)),
            }
        }
        Self { counts }
    }

    /// `(keyword, hits)` pairs
    pub fn counts(&self) -> &[(String, usize)] {
        &self.counts
    }

    /// Hits for one keyword (exact casing)
    pub fn count_for(&self, keyword: &str) -> usize {
        self.counts
            .iter()
            .find(|(k, _)| k == keyword)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// Total hits
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}
