//! Filesystem audio store

use crate::{validate_filename, StoreError};
use prospect_domain::traits::{AudioEntry, AudioSaveOutcome, AudioStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const INDEX_FILE: &str = ".index.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct IndexEntry {
    content_hash: String,
    size: u64,
}

/// Stores audio blobs as plain files next to a hash index
///
/// The index maps filename to content hash so a second upload of the same
/// bytes is reported as a duplicate instead of written again.
#[derive(Debug, Clone)]
pub struct FsAudioStore {
    dir: PathBuf,
}

impl FsAudioStore {
    /// Open (and create if needed) an audio directory
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Root directory of the store
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn index_path(&self) -> PathBuf {
        self.dir.join(INDEX_FILE)
    }

    fn load_index(&self) -> Result<BTreeMap<String, IndexEntry>, StoreError> {
        let path = self.index_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn save_index(&self, index: &BTreeMap<String, IndexEntry>) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(index)?;
        write_atomic(&self.index_path(), &json)
    }
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn to_entry(filename: &str, entry: &IndexEntry) -> AudioEntry {
    AudioEntry {
        filename: filename.to_string(),
        content_hash: entry.content_hash.clone(),
        size: entry.size,
    }
}

impl AudioStore for FsAudioStore {
    type Error = StoreError;

    fn save_audio(
        &mut self,
        filename: &str,
        bytes: &[u8],
        content_hash: &str,
    ) -> Result<AudioSaveOutcome, Self::Error> {
        validate_filename(filename)?;
        let mut index = self.load_index()?;

        if let Some((name, entry)) = index.iter().find(|(_, e)| e.content_hash == content_hash) {
            debug!("Audio '{}' duplicates stored '{}'", filename, name);
            return Ok(AudioSaveOutcome::Duplicate {
                existing: to_entry(name, entry),
            });
        }

        write_atomic(&self.dir.join(filename), bytes)?;
        let entry = IndexEntry {
            content_hash: content_hash.to_string(),
            size: bytes.len() as u64,
        };
        let saved = to_entry(filename, &entry);
        index.insert(filename.to_string(), entry);
        self.save_index(&index)?;

        info!("Saved audio '{}' ({} bytes)", filename, saved.size);
        Ok(AudioSaveOutcome::Saved(saved))
    }

    fn list_audio(&self) -> Result<Vec<AudioEntry>, Self::Error> {
        Ok(self
            .load_index()?
            .iter()
            .map(|(name, entry)| to_entry(name, entry))
            .collect())
    }

    fn delete_audio(&mut self, filename: &str) -> Result<bool, Self::Error> {
        validate_filename(filename)?;
        let mut index = self.load_index()?;
        let path = self.dir.join(filename);

        let indexed = index.remove(filename).is_some();
        let on_disk = path.exists();
        if on_disk {
            fs::remove_file(&path)?;
        }
        if indexed {
            self.save_index(&index)?;
        }
        Ok(indexed || on_disk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_directory_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsAudioStore::new(dir.path()).unwrap();
        assert!(store.list_audio().unwrap().is_empty());
    }

    #[test]
    fn test_rejects_path_escape() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FsAudioStore::new(dir.path()).unwrap();
        assert!(matches!(
            store.save_audio("../x.wav", b"x", "h"),
            Err(StoreError::InvalidData(_))
        ));
    }
}
