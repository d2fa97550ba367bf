//! Analysis result repository

use skinglow_shared::{AnalysisResult, StoreError};

use super::{read_json, write_json};
use crate::storage::{KeyValueStore, ANALYSIS_KEY};

/// Repository for the `analysis` record
pub struct AnalysisRepository;

impl AnalysisRepository {
    pub async fn get(store: &dyn KeyValueStore) -> Result<Option<AnalysisResult>, StoreError> {
        read_json(store, ANALYSIS_KEY).await
    }

    pub async fn put(store: &dyn KeyValueStore, result: &AnalysisResult) -> Result<(), StoreError> {
        write_json(store, ANALYSIS_KEY, result).await
    }

    pub async fn delete(store: &dyn KeyValueStore) -> Result<(), StoreError> {
        store.remove(ANALYSIS_KEY).await
    }
}
