//! Reminder repository

use skinglow_shared::{Reminder, StoreError};

use super::{read_json, write_json};
use crate::storage::{KeyValueStore, REMINDERS_KEY};

/// Repository for the `reminders` record
pub struct ReminderRepository;

impl ReminderRepository {
    pub async fn get(store: &dyn KeyValueStore) -> Result<Vec<Reminder>, StoreError> {
        Ok(read_json(store, REMINDERS_KEY).await?.unwrap_or_default())
    }

    pub async fn put(store: &dyn KeyValueStore, reminders: &[Reminder]) -> Result<(), StoreError> {
        write_json(store, REMINDERS_KEY, reminders).await
    }

    pub async fn delete(store: &dyn KeyValueStore) -> Result<(), StoreError> {
        store.remove(REMINDERS_KEY).await
    }
}
