//! Common test utilities for integration tests
//!
//! Shared setup for file-backed state, failing storage and sample data.

#![allow(dead_code)]

use async_trait::async_trait;
use skinglow_client::{
    config::{ApiConfig, AppConfig, StorageConfig},
    state::AppState,
    storage::{FileStore, KeyValueStore},
};
use skinglow_shared::{AnalysisResult, Diet, Gender, StoreError, UserProfile};
use std::sync::Arc;
use tempfile::TempDir;

/// File-backed state rooted in a temporary directory
pub struct TestApp {
    pub dir: TempDir,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let state = Self::open(&dir).await;
        Self { dir, state }
    }

    /// Fresh state over the same directory, as after an app restart
    pub async fn restart(&self) -> AppState {
        Self::open(&self.dir).await
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(self.dir.path())
    }

    async fn open(dir: &TempDir) -> AppState {
        let config = test_config(dir, "http://127.0.0.1:9");
        let storage = Arc::new(FileStore::new(dir.path()));
        AppState::init(storage, config).await
    }
}

pub fn test_config(dir: &TempDir, base_url: &str) -> AppConfig {
    AppConfig {
        storage: StorageConfig {
            data_dir: dir.path().to_path_buf(),
        },
        api: ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            auth_token: None,
        },
    }
}

/// Store whose every operation fails, to exercise best-effort writes
pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("disk on fire".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("disk on fire".to_string()))
    }

    async fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("disk on fire".to_string()))
    }
}

pub fn sample_profile() -> UserProfile {
    UserProfile {
        age: 25,
        gender: Gender::Female,
        height_cm: 165,
        weight_kg: 58,
        diet: Diet::Vegetarian,
        ethnicity: None,
    }
}

pub fn analysis(value: serde_json::Value) -> AnalysisResult {
    serde_json::from_value(value).expect("Invalid analysis fixture")
}
