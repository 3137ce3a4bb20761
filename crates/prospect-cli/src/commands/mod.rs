//! Command implementations.

pub mod audio;
pub mod delete;
pub mod extract;
pub mod list;
pub mod update;

pub use self::audio::execute_audio;
pub use self::delete::execute_delete;
pub use self::extract::execute_extract;
pub use self::list::execute_list;
pub use self::update::execute_update;

use crate::config::StorageConfig;
use crate::error::{CliError, Result};
use prospect_domain::{OpportunityId, RecordingId};
use prospect_store::{FallbackStore, JsonFileStore, SqliteStore};
use std::fs;

/// Opportunity store used by the CLI: SQLite first, JSON files as fallback.
pub type AppStore = FallbackStore<SqliteStore, JsonFileStore>;

/// Open both storage tiers described by the configuration.
pub fn open_store(storage: &StorageConfig) -> Result<AppStore> {
    if let Some(parent) = storage.database_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let primary = SqliteStore::new(&storage.database_path)?;
    let secondary = JsonFileStore::new(&storage.fallback_dir)?;
    Ok(FallbackStore::new(primary, secondary))
}

pub(crate) fn parse_id(input: &str) -> Result<OpportunityId> {
    OpportunityId::from_string(input.trim())
        .map_err(|e| CliError::InvalidInput(format!("Invalid ID '{}': {}", input, e)))
}

pub(crate) fn parse_recording(input: &str) -> Result<RecordingId> {
    RecordingId::new(input.trim()).map_err(CliError::InvalidInput)
}
