//! Application state management
//!
//! [`AppState`] owns the device-local store and the in-memory snapshot of
//! every persisted record. Readers get clones of the snapshot; only the
//! services in [`crate::services`] mutate it.
//!
//! # Consistency
//!
//! The snapshot lives behind a single `RwLock`. Mutations hold the write lock
//! across their storage I/O, so an observer sees an operation's effects on
//! every record at once or not at all. Concurrent writers are serialized and
//! the last one to take the lock wins.

use crate::config::AppConfig;
use crate::services::{AnalysisCache, ProfileStore, ReminderBook, ScoreHistoryLog};
use crate::storage::KeyValueStore;
use skinglow_shared::{AnalysisResult, Reminder, ScoreHistoryEntry, UserProfile};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// In-memory copy of every persisted record
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub profile: Option<UserProfile>,
    pub analysis: Option<AnalysisResult>,
    pub history: Vec<ScoreHistoryEntry>,
    pub reminders: Vec<Reminder>,
}

/// Shared application state
///
/// Cloning is cheap: every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    storage: Arc<dyn KeyValueStore>,
    snapshot: Arc<RwLock<Snapshot>>,
    config: Arc<AppConfig>,
}

impl AppState {
    /// State with an empty snapshot; nothing is read from storage
    pub fn new(storage: Arc<dyn KeyValueStore>, config: AppConfig) -> Self {
        Self {
            storage,
            snapshot: Arc::new(RwLock::new(Snapshot::default())),
            config: Arc::new(config),
        }
    }

    /// Create the state and load every record from storage
    pub async fn init(storage: Arc<dyn KeyValueStore>, config: AppConfig) -> Self {
        let state = Self::new(storage, config);

        let profile = state.profile().load().await;
        let analysis = state.analysis().load().await;
        let history = state.history().load().await;
        let reminders = state.reminders().load().await;

        info!(
            profile_complete = profile.is_some(),
            has_analysis = analysis.is_some(),
            history_entries = history.len(),
            reminders = reminders.len(),
            "State loaded"
        );

        state
    }

    /// Get a reference to the underlying store
    #[inline]
    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Consistent copy of all records
    pub async fn snapshot(&self) -> Snapshot {
        self.snapshot.read().await.clone()
    }

    pub(crate) fn snapshot_lock(&self) -> &RwLock<Snapshot> {
        &self.snapshot
    }

    pub fn profile(&self) -> ProfileStore<'_> {
        ProfileStore::new(self)
    }

    pub fn analysis(&self) -> AnalysisCache<'_> {
        AnalysisCache::new(self)
    }

    pub fn history(&self) -> ScoreHistoryLog<'_> {
        ScoreHistoryLog::new(self)
    }

    pub fn reminders(&self) -> ReminderBook<'_> {
        ReminderBook::new(self)
    }
}
