//! JSON file opportunity store
//!
//! One pretty-printed file per opportunity, named `{recording}_{id}.json`.
//! Files are written to a temporary name and renamed into place.

use crate::record::OpportunityRecord;
use crate::StoreError;
use prospect_domain::traits::OpportunityStore;
use prospect_domain::{Opportunity, OpportunityId, OpportunityUpdate, RecordingId};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const EXTENSION: &str = ".json";

/// Directory of JSON files, the local fallback tier
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) a store rooted at `dir`
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Root directory of the store
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_name(recording: &RecordingId, id: OpportunityId) -> String {
        format!("{}_{}{}", recording, id, EXTENSION)
    }

    /// Split `{recording}_{id}.json` into its parts
    ///
    /// Recording ids may contain `_`, so the split happens at the last one.
    fn parse_file_name(name: &str) -> Option<(&str, &str)> {
        name.strip_suffix(EXTENSION)?.rsplit_once('_')
    }

    fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    fn read_record(path: &Path) -> Result<OpportunityRecord, StoreError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn write_record(path: &Path, record: &OpportunityRecord) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(record)?;
        Self::write_atomic(path, &json)
    }

    /// Paths of all files whose name matches the predicate
    fn matching_files<F>(&self, mut predicate: F) -> Result<Vec<PathBuf>, StoreError>
    where
        F: FnMut(&str, &str) -> bool,
    {
        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some((recording, id)) = Self::parse_file_name(name) {
                if predicate(recording, id) {
                    paths.push(entry.path());
                }
            }
        }
        Ok(paths)
    }

    fn find_by_id(&self, id: OpportunityId) -> Result<Option<PathBuf>, StoreError> {
        let wanted = id.to_string();
        let mut paths = self.matching_files(|_, file_id| file_id == wanted)?;
        Ok(paths.pop())
    }

    /// Ids of every stored opportunity, from a single directory scan
    fn stored_ids(&self) -> Result<HashSet<String>, StoreError> {
        let paths = self.matching_files(|_, _| true)?;
        Ok(paths
            .iter()
            .filter_map(|path| {
                let name = path.file_name()?.to_str()?;
                Self::parse_file_name(name).map(|(_, id)| id.to_string())
            })
            .collect())
    }

    /// Roll back files written by a failed batch
    fn remove_all(paths: &[PathBuf]) {
        for path in paths {
            if let Err(e) = fs::remove_file(path) {
                warn!("Could not roll back {}: {}", path.display(), e);
            }
        }
    }

    fn records_for(&self, recording: &RecordingId) -> Result<Vec<OpportunityRecord>, StoreError> {
        let paths = self.matching_files(|file_recording, _| file_recording == recording.as_str())?;

        let mut records = Vec::with_capacity(paths.len());
        for path in paths {
            match Self::read_record(&path) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping unreadable opportunity file {}: {}", path.display(), e),
            }
        }
        records.sort_by_key(|r| r.seq);
        Ok(records)
    }
}

impl OpportunityStore for JsonFileStore {
    type Error = StoreError;

    fn save_opportunities(
        &mut self,
        recording: &RecordingId,
        opportunities: &[Opportunity],
    ) -> Result<Vec<OpportunityId>, Self::Error> {
        let mut taken = self.stored_ids()?;
        for opp in opportunities {
            if !taken.insert(opp.id.to_string()) {
                return Err(StoreError::Duplicate(opp.id.to_string()));
            }
        }

        let next_seq = self
            .records_for(recording)?
            .iter()
            .map(|r| r.seq + 1)
            .max()
            .unwrap_or(0);

        let mut written = Vec::with_capacity(opportunities.len());
        for (offset, opp) in opportunities.iter().enumerate() {
            let record = OpportunityRecord::from_opportunity(opp, recording, next_seq + offset as u64);
            let path = self.dir.join(Self::file_name(recording, opp.id));
            if let Err(e) = Self::write_record(&path, &record) {
                Self::remove_all(&written);
                return Err(e);
            }
            written.push(path);
        }

        debug!("Wrote {} opportunity files for '{}'", written.len(), recording);
        Ok(opportunities.iter().map(|o| o.id).collect())
    }

    fn list_opportunities(&self, recording: &RecordingId) -> Result<Vec<Opportunity>, Self::Error> {
        self.records_for(recording)?
            .into_iter()
            .map(OpportunityRecord::into_opportunity)
            .collect()
    }

    fn get_opportunity(&self, id: OpportunityId) -> Result<Option<Opportunity>, Self::Error> {
        match self.find_by_id(id)? {
            Some(path) => Ok(Some(Self::read_record(&path)?.into_opportunity()?)),
            None => Ok(None),
        }
    }

    fn update_opportunity(
        &mut self,
        id: OpportunityId,
        update: &OpportunityUpdate,
    ) -> Result<bool, Self::Error> {
        let Some(path) = self.find_by_id(id)? else {
            return Ok(false);
        };

        let record = Self::read_record(&path)?;
        let seq = record.seq;
        let mut opp = record.into_opportunity()?;
        opp.apply(update);

        let recording = opp
            .recording_id
            .clone()
            .ok_or_else(|| StoreError::InvalidData(format!("Opportunity {} has no recording", id)))?;
        let record = OpportunityRecord::from_opportunity(&opp, &recording, seq);
        Self::write_record(&path, &record)?;
        Ok(true)
    }

    fn delete_opportunity(&mut self, id: OpportunityId) -> Result<bool, Self::Error> {
        match self.find_by_id(id)? {
            Some(path) => {
                fs::remove_file(path)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
