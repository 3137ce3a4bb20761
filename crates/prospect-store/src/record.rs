//! Serialized form of an opportunity for file storage

use crate::StoreError;
use prospect_domain::{Opportunity, OpportunityId, RecordingId};
use serde::{Deserialize, Serialize};

/// On-disk JSON shape of one opportunity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct OpportunityRecord {
    pub id: String,
    pub recording_id: String,
    /// Insertion position within the recording
    pub seq: u64,
    pub label: String,
    pub keyword: String,
    pub occurrence: usize,
    pub context_before: String,
    pub context_after: String,
    pub full_context: String,
    pub status: String,
    pub priority: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: u64,
}

impl OpportunityRecord {
    pub fn from_opportunity(opp: &Opportunity, recording: &RecordingId, seq: u64) -> Self {
        Self {
            id: opp.id.to_string(),
            recording_id: recording.to_string(),
            seq,
            label: opp.label.clone(),
            keyword: opp.keyword.clone(),
            occurrence: opp.occurrence,
            context_before: opp.context_before.clone(),
            context_after: opp.context_after.clone(),
            full_context: opp.full_context.clone(),
            status: opp.status.clone(),
            priority: opp.priority.clone(),
            notes: opp.notes.clone(),
            created_at: opp.created_at,
        }
    }

    pub fn into_opportunity(self) -> Result<Opportunity, StoreError> {
        let id = OpportunityId::from_string(&self.id).map_err(StoreError::InvalidData)?;
        let recording_id = RecordingId::new(self.recording_id).map_err(StoreError::InvalidData)?;

        Ok(Opportunity {
            id,
            label: self.label,
            recording_id: Some(recording_id),
            keyword: self.keyword,
            occurrence: self.occurrence,
            context_before: self.context_before,
            context_after: self.context_after,
            full_context: self.full_context,
            status: self.status,
            priority: self.priority,
            notes: self.notes,
            created_at: self.created_at,
        })
    }
}
