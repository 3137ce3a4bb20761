//! Prospect Domain Layer
//!
//! Core value types and collaborator traits for Prospect. The only external
//! dependency is `uuid`; everything that touches a disk, a network or a model
//! lives in the infrastructure crates and plugs in through [`traits`].
//!
//! ## Key Concepts
//!
//! - **Recording**: one audio file and its transcript, parent of a batch of opportunities
//! - **Opportunity**: one keyword occurrence with its surrounding context
//! - **Priority / Status**: user-editable tags on an opportunity
//!
//! ## Architecture
//!
//! - Pure value types only
//! - Storage, transcription and LLM access are traits implemented elsewhere

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod opportunity;
pub mod priority;
pub mod recording;
pub mod status;
pub mod traits;

// Re-exports for convenience
pub use opportunity::{Opportunity, OpportunityId, OpportunityUpdate};
pub use priority::Priority;
pub use recording::RecordingId;
pub use status::Status;
