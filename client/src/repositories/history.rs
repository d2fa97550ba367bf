//! Score history repository

use skinglow_shared::{ScoreHistoryEntry, StoreError};

use super::{read_json, write_json};
use crate::storage::{KeyValueStore, SCORE_HISTORY_KEY};

/// Repository for the `score_history` record
pub struct HistoryRepository;

impl HistoryRepository {
    /// Stored entries in insertion order; empty when the record is absent
    pub async fn get(store: &dyn KeyValueStore) -> Result<Vec<ScoreHistoryEntry>, StoreError> {
        Ok(read_json(store, SCORE_HISTORY_KEY).await?.unwrap_or_default())
    }

    pub async fn put(
        store: &dyn KeyValueStore,
        entries: &[ScoreHistoryEntry],
    ) -> Result<(), StoreError> {
        write_json(store, SCORE_HISTORY_KEY, entries).await
    }

    pub async fn delete(store: &dyn KeyValueStore) -> Result<(), StoreError> {
        store.remove(SCORE_HISTORY_KEY).await
    }
}
