//! SQLite-backed opportunity store

use crate::StoreError;
use prospect_domain::traits::OpportunityStore;
use prospect_domain::{Opportunity, OpportunityId, OpportunityUpdate, Priority, RecordingId};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use tracing::debug;

const SELECT_COLUMNS: &str = "SELECT id, recording_id, label, keyword, occurrence, context_before, \
     context_after, full_context, status, priority, notes, created_at FROM opportunities";

/// SQLite-based implementation of OpportunityStore
///
/// The relational tier. Priorities are narrowed to `Low`/`Medium`/`High`
/// on every write.
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Share a store behind a mutex or
/// give each thread its own instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use prospect_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("prospect.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(include_str!("schema.sql"))?;
        Ok(())
    }

    fn id_to_bytes(id: OpportunityId) -> Vec<u8> {
        id.value().to_be_bytes().to_vec()
    }

    fn bytes_to_id(bytes: &[u8]) -> Result<OpportunityId, StoreError> {
        if bytes.len() != 16 {
            return Err(StoreError::InvalidData(format!(
                "Expected 16 bytes for OpportunityId, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 16];
        arr.copy_from_slice(bytes);
        Ok(OpportunityId::from_value(u128::from_be_bytes(arr)))
    }

    fn conversion_error(column: usize, ty: rusqlite::types::Type, e: StoreError) -> rusqlite::Error {
        rusqlite::Error::FromSqlConversionFailure(column, ty, Box::new(e))
    }

    fn row_to_opportunity(row: &Row<'_>) -> rusqlite::Result<Opportunity> {
        let id_bytes: Vec<u8> = row.get(0)?;
        let id = Self::bytes_to_id(&id_bytes)
            .map_err(|e| Self::conversion_error(0, rusqlite::types::Type::Blob, e))?;

        let recording: String = row.get(1)?;
        let recording_id = RecordingId::new(recording).map_err(|e| {
            Self::conversion_error(1, rusqlite::types::Type::Text, StoreError::InvalidData(e))
        })?;

        Ok(Opportunity {
            id,
            recording_id: Some(recording_id),
            label: row.get(2)?,
            keyword: row.get(3)?,
            occurrence: row.get::<_, i64>(4)? as usize,
            context_before: row.get(5)?,
            context_after: row.get(6)?,
            full_context: row.get(7)?,
            status: row.get(8)?,
            priority: row.get(9)?,
            notes: row.get(10)?,
            created_at: row.get::<_, i64>(11)? as u64,
        })
    }
}

impl OpportunityStore for SqliteStore {
    type Error = StoreError;

    fn save_opportunities(
        &mut self,
        recording: &RecordingId,
        opportunities: &[Opportunity],
    ) -> Result<Vec<OpportunityId>, Self::Error> {
        let tx = self.conn.transaction()?;
        let mut ids = Vec::with_capacity(opportunities.len());

        for opp in opportunities {
            let id_bytes = Self::id_to_bytes(opp.id);

            let exists: bool = tx
                .query_row(
                    "SELECT 1 FROM opportunities WHERE id = ?1",
                    params![&id_bytes],
                    |_| Ok(true),
                )
                .optional()?
                .unwrap_or(false);
            if exists {
                return Err(StoreError::Duplicate(opp.id.to_string()));
            }

            tx.execute(
                "INSERT INTO opportunities (id, recording_id, label, keyword, occurrence, context_before,
                 context_after, full_context, status, priority, notes, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    &id_bytes,
                    recording.as_str(),
                    &opp.label,
                    &opp.keyword,
                    opp.occurrence as i64,
                    &opp.context_before,
                    &opp.context_after,
                    &opp.full_context,
                    &opp.status,
                    Priority::normalize(&opp.priority).as_str(),
                    &opp.notes,
                    opp.created_at as i64,
                ],
            )?;
            ids.push(opp.id);
        }

        tx.commit()?;
        debug!("Saved {} opportunities for '{}'", ids.len(), recording);
        Ok(ids)
    }

    fn list_opportunities(&self, recording: &RecordingId) -> Result<Vec<Opportunity>, Self::Error> {
        let sql = format!("{} WHERE recording_id = ?1 ORDER BY seq", SELECT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;

        let opportunities = stmt
            .query_map(params![recording.as_str()], Self::row_to_opportunity)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(opportunities)
    }

    fn get_opportunity(&self, id: OpportunityId) -> Result<Option<Opportunity>, Self::Error> {
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        let opportunity = self
            .conn
            .query_row(&sql, params![Self::id_to_bytes(id)], Self::row_to_opportunity)
            .optional()?;

        Ok(opportunity)
    }

    fn update_opportunity(
        &mut self,
        id: OpportunityId,
        update: &OpportunityUpdate,
    ) -> Result<bool, Self::Error> {
        let priority = update
            .priority
            .as_deref()
            .map(|p| Priority::normalize(p).as_str());

        let changed = self.conn.execute(
            "UPDATE opportunities SET
                 status = COALESCE(?1, status),
                 priority = COALESCE(?2, priority),
                 notes = COALESCE(?3, notes)
             WHERE id = ?4",
            params![
                update.status.as_deref(),
                priority,
                update.notes.as_deref(),
                Self::id_to_bytes(id),
            ],
        )?;

        Ok(changed > 0)
    }

    fn delete_opportunity(&mut self, id: OpportunityId) -> Result<bool, Self::Error> {
        let deleted = self.conn.execute(
            "DELETE FROM opportunities WHERE id = ?1",
            params![Self::id_to_bytes(id)],
        )?;
        Ok(deleted > 0)
    }
}
