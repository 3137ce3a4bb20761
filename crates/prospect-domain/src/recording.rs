//! Recording identifiers

use std::fmt;

/// Identifier of the recording a batch of opportunities belongs to
///
/// Used verbatim as a filename prefix by file-backed stores, so it must be
/// non-empty and free of path separators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordingId(String);

impl RecordingId {
    /// Create a new recording id
    ///
    /// # Errors
    /// Returns error if the id is empty or could escape a directory
    pub fn new(value: impl Into<String>) -> Result<Self, String> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err("Recording id cannot be empty".to_string());
        }
        if value.contains('/') || value.contains('\\') || value.contains("..") {
            return Err(format!("Recording id '{}' contains a path separator", value));
        }
        Ok(Self(value))
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
