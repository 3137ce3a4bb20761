//! Configuration for the Extractor

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tokens kept on each side of a keyword match
pub const DEFAULT_CONTEXT_WINDOW: usize = 15;

/// How repeated entries in the keyword list are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum KeywordPolicy {
    /// Scan once per list entry; each repeat restarts its occurrence count at 1
    #[default]
    ScanEach,
    /// Drop later case-insensitive repeats before scanning
    Dedupe,
}

/// Configuration for the Extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum tokens of context on each side of a match
    pub context_window: usize,

    /// Treatment of duplicate keywords
    pub keyword_policy: KeywordPolicy,

    /// Maximum time for a single transcription call (seconds)
    pub transcription_timeout_secs: u64,
}

impl ExtractorConfig {
    /// Get the transcription timeout as a Duration
    pub fn transcription_timeout(&self) -> Duration {
        Duration::from_secs(self.transcription_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.transcription_timeout_secs == 0 {
            return Err("transcription_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Preset that collapses repeated keywords
    pub fn deduplicating() -> Self {
        Self {
            keyword_policy: KeywordPolicy::Dedupe,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str)
            .map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            context_window: DEFAULT_CONTEXT_WINDOW,
            keyword_policy: KeywordPolicy::ScanEach,
            transcription_timeout_secs: 120,
        }
    }
}
