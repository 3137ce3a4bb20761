//! Prospect Storage Layer
//!
//! Persistence for opportunities and audio.
//!
//! # Architecture
//!
//! - [`SqliteStore`]: relational primary tier
//! - [`JsonFileStore`]: one JSON file per opportunity, the local fallback tier
//! - [`FallbackStore`]: composes two tiers; every operation tries the primary
//!   and repeats against the secondary when it fails
//! - [`FsAudioStore`]: raw audio blobs with duplicate detection by content hash
//!
//! # Examples
//!
//! ```no_run
//! use prospect_store::{FallbackStore, JsonFileStore, SqliteStore};
//!
//! let primary = SqliteStore::new("prospect.db").unwrap();
//! let secondary = JsonFileStore::new("opportunities").unwrap();
//! let store = FallbackStore::new(primary, secondary);
//! // Store is now ready for opportunity operations
//! ```

#![warn(missing_docs)]

mod audio;
mod fallback;
mod json_file;
mod record;
mod sqlite;

use sha2::{Digest, Sha256};
use thiserror::Error;

pub use audio::FsAudioStore;
pub use fallback::FallbackStore;
pub use json_file::JsonFileStore;
pub use sqlite::SqliteStore;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// An opportunity with this id is already stored
    #[error("Duplicate opportunity: {0}")]
    Duplicate(String),

    /// Primary and fallback tier both failed
    #[error("{operation} failed on both tiers (primary: {primary}; fallback: {secondary})")]
    BothTiersFailed {
        /// Operation name
        operation: &'static str,
        /// Primary tier error
        primary: String,
        /// Fallback tier error
        secondary: String,
    },
}

/// Hex SHA-256 of an audio payload, used for duplicate detection
///
/// # Examples
///
/// ```
/// let hash = prospect_store::content_hash(b"abc");
/// assert_eq!(hash.len(), 64);
/// assert_eq!(hash, prospect_store::content_hash(b"abc"));
/// ```
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Reject names that could escape the storage directory
pub(crate) fn validate_filename(name: &str) -> Result<(), StoreError> {
    if name.trim().is_empty()
        || name.starts_with('.')
        || name.contains('/')
        || name.contains('\\')
        || name.contains("..")
    {
        return Err(StoreError::InvalidData(format!("Invalid filename '{}'", name)));
    }
    Ok(())
}
