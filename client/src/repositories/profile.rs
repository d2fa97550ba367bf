//! User profile repository

use skinglow_shared::{StoreError, UserProfile};

use super::{read_json, write_json};
use crate::storage::{KeyValueStore, USER_KEY};

/// Repository for the `user` record
pub struct ProfileRepository;

impl ProfileRepository {
    pub async fn get(store: &dyn KeyValueStore) -> Result<Option<UserProfile>, StoreError> {
        read_json(store, USER_KEY).await
    }

    /// Replace the stored profile in full
    pub async fn put(store: &dyn KeyValueStore, profile: &UserProfile) -> Result<(), StoreError> {
        write_json(store, USER_KEY, profile).await
    }

    pub async fn delete(store: &dyn KeyValueStore) -> Result<(), StoreError> {
        store.remove(USER_KEY).await
    }
}
