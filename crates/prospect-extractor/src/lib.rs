//! Prospect Extractor
//!
//! Flags business opportunities in transcripts by scanning for keywords.
//!
//! # Overview
//!
//! The [`OpportunityExtractor`] lowercases a transcript, splits it on
//! whitespace, and emits one [`prospect_domain::Opportunity`] per token that
//! contains a keyword, carrying up to 15 tokens of context on each side.
//! It does no I/O. The [`IngestPipeline`] wraps it with a transcriber and a
//! store for the full audio-to-database path.
//!
//! # Architecture
//!
//! ```text
//! Audio → Transcriber → OpportunityExtractor → OpportunityStore
//! ```
//!
//! # Example Usage
//!
//! ```
//! use prospect_extractor::{ExtractorConfig, OpportunityExtractor};
//!
//! let extractor = OpportunityExtractor::new(ExtractorConfig::default());
//! let opps = extractor
//!     .extract("we need to discuss budget today and budget again", &["budget"]);
//!
//! assert_eq!(opps.len(), 2);
//! assert_eq!(opps[1].occurrence, 2);
//! assert_eq!(opps[1].context_before, "we need to discuss budget today and");
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod pipeline;
mod tokenize;
mod types;

#[cfg(test)]
mod tests;

pub use config::{ExtractorConfig, KeywordPolicy, DEFAULT_CONTEXT_WINDOW};
pub use error::ExtractorError;
pub use extractor::OpportunityExtractor;
pub use pipeline::IngestPipeline;
pub use tokenize::TokenizedTranscript;
pub use types::{ExtractionSummary, IngestRequest, IngestResult};
