//! Typed access to persisted records
//!
//! Repositories translate between domain types and the raw strings held by a
//! [`KeyValueStore`]. They report every failure; deciding what to do about it
//! is the services' job.

pub mod analysis;
pub mod history;
pub mod profile;
pub mod reminders;

pub use analysis::AnalysisRepository;
pub use history::HistoryRepository;
pub use profile::ProfileRepository;
pub use reminders::ReminderRepository;

use serde::de::DeserializeOwned;
use serde::Serialize;
use skinglow_shared::StoreError;

use crate::storage::KeyValueStore;

/// Read and parse a JSON record; `Ok(None)` when the key is absent
pub(crate) async fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Deserialize {
            key: key.to_string(),
            source,
        })
}

/// Serialize and durably write a JSON record
pub(crate) async fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn test_read_json_absent() {
        let store = MemoryStore::new();
        let value: Option<Vec<i32>> = read_json(&store, "missing").await.unwrap();
        assert!(value.is_none());
    }

    #[tokio::test]
    async fn test_read_json_corrupt() {
        let store = MemoryStore::with_records([("numbers", "[1, 2,")]);
        let result: Result<Option<Vec<i32>>, _> = read_json(&store, "numbers").await;
        assert!(matches!(
            result,
            Err(StoreError::Deserialize { ref key, .. }) if key == "numbers"
        ));
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let store = MemoryStore::new();
        write_json(&store, "numbers", &vec![1, 2, 3]).await.unwrap();
        let value: Option<Vec<i32>> = read_json(&store, "numbers").await.unwrap();
        assert_eq!(value, Some(vec![1, 2, 3]));
    }
}
