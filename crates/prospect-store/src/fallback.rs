//! Two-tier store composition

use crate::StoreError;
use prospect_domain::traits::OpportunityStore;
use prospect_domain::{Opportunity, OpportunityId, OpportunityUpdate, RecordingId};
use std::fmt::Display;
use tracing::warn;

/// Tries every operation on the primary tier, then on the secondary
///
/// The secondary is consulted only when the primary returns an error. A
/// successful "not found" from the primary is final. When both tiers fail
/// the result is [`StoreError::BothTiersFailed`] carrying both messages.
pub struct FallbackStore<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> FallbackStore<P, S>
where
    P: OpportunityStore,
    S: OpportunityStore,
    P::Error: Display,
    S::Error: Display,
{
    /// Compose a primary and a secondary tier
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }

    /// Primary tier
    pub fn primary(&self) -> &P {
        &self.primary
    }

    /// Secondary tier
    pub fn secondary(&self) -> &S {
        &self.secondary
    }

    fn read<T>(
        &self,
        operation: &'static str,
        target: &str,
        on_primary: impl FnOnce(&P) -> Result<T, P::Error>,
        on_secondary: impl FnOnce(&S) -> Result<T, S::Error>,
    ) -> Result<T, StoreError> {
        match on_primary(&self.primary) {
            Ok(value) => Ok(value),
            Err(primary) => {
                warn!(operation, subject = target, error = %primary, "Primary store failed, using fallback");
                on_secondary(&self.secondary).map_err(|secondary| StoreError::BothTiersFailed {
                    operation,
                    primary: primary.to_string(),
                    secondary: secondary.to_string(),
                })
            }
        }
    }

    fn write<T>(
        &mut self,
        operation: &'static str,
        target: &str,
        on_primary: impl FnOnce(&mut P) -> Result<T, P::Error>,
        on_secondary: impl FnOnce(&mut S) -> Result<T, S::Error>,
    ) -> Result<T, StoreError> {
        match on_primary(&mut self.primary) {
            Ok(value) => Ok(value),
            Err(primary) => {
                warn!(operation, subject = target, error = %primary, "Primary store failed, using fallback");
                on_secondary(&mut self.secondary).map_err(|secondary| StoreError::BothTiersFailed {
                    operation,
                    primary: primary.to_string(),
                    secondary: secondary.to_string(),
                })
            }
        }
    }
}

impl<P, S> OpportunityStore for FallbackStore<P, S>
where
    P: OpportunityStore,
    S: OpportunityStore,
    P::Error: Display,
    S::Error: Display,
{
    type Error = StoreError;

    fn save_opportunities(
        &mut self,
        recording: &RecordingId,
        opportunities: &[Opportunity],
    ) -> Result<Vec<OpportunityId>, Self::Error> {
        self.write(
            "save_opportunities",
            recording.as_str(),
            |p| p.save_opportunities(recording, opportunities),
            |s| s.save_opportunities(recording, opportunities),
        )
    }

    fn list_opportunities(&self, recording: &RecordingId) -> Result<Vec<Opportunity>, Self::Error> {
        self.read(
            "list_opportunities",
            recording.as_str(),
            |p| p.list_opportunities(recording),
            |s| s.list_opportunities(recording),
        )
    }

    fn get_opportunity(&self, id: OpportunityId) -> Result<Option<Opportunity>, Self::Error> {
        let target = id.to_string();
        self.read(
            "get_opportunity",
            &target,
            |p| p.get_opportunity(id),
            |s| s.get_opportunity(id),
        )
    }

    fn update_opportunity(
        &mut self,
        id: OpportunityId,
        update: &OpportunityUpdate,
    ) -> Result<bool, Self::Error> {
        let target = id.to_string();
        self.write(
            "update_opportunity",
            &target,
            |p| p.update_opportunity(id, update),
            |s| s.update_opportunity(id, update),
        )
    }

    fn delete_opportunity(&mut self, id: OpportunityId) -> Result<bool, Self::Error> {
        let target = id.to_string();
        self.write(
            "delete_opportunity",
            &target,
            |p| p.delete_opportunity(id),
            |s| s.delete_opportunity(id),
        )
    }
}
