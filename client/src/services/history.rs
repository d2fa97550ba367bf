//! Score history log - capped, insertion-ordered trend data
//!
//! Entries are appended when an analysis with a numeric score is cached and
//! the oldest are dropped once the log exceeds [`MAX_HISTORY_ENTRIES`].

use crate::repositories::HistoryRepository;
use crate::state::AppState;
use crate::storage::KeyValueStore;
use chrono::Utc;
use skinglow_shared::{HistoryContext, HistoryStats, ScoreHistoryEntry};
use tracing::{debug, warn};

/// Maximum number of retained history entries
pub const MAX_HISTORY_ENTRIES: usize = 30;

/// Handle on the `score_history` record
pub struct ScoreHistoryLog<'a> {
    state: &'a AppState,
}

impl<'a> ScoreHistoryLog<'a> {
    pub(crate) fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Read the persisted log into the snapshot; unreadable data yields an empty log
    pub async fn load(&self) -> Vec<ScoreHistoryEntry> {
        let mut snapshot = self.state.snapshot_lock().write().await;

        let mut entries = match HistoryRepository::get(self.state.storage()).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable score history");
                Vec::new()
            }
        };
        let dropped = keep_most_recent(&mut entries);
        if dropped > 0 {
            debug!(dropped, "Oversized score history truncated on load");
        }

        snapshot.history = entries.clone();
        entries
    }

    /// Record a score with the analysis context it came from
    pub async fn append(&self, score: i64, context: HistoryContext) -> ScoreHistoryEntry {
        let mut snapshot = self.state.snapshot_lock().write().await;
        append_entry(self.state.storage(), &mut snapshot.history, score, context).await
    }

    /// Drop every entry and the persisted record
    pub async fn clear(&self) {
        let mut snapshot = self.state.snapshot_lock().write().await;

        if let Err(e) = HistoryRepository::delete(self.state.storage()).await {
            warn!(error = %e, "Failed to remove persisted score history");
        }
        snapshot.history.clear();
        debug!("Score history cleared");
    }

    /// Current entries in insertion order
    pub async fn entries(&self) -> Vec<ScoreHistoryEntry> {
        self.state.snapshot_lock().read().await.history.clone()
    }

    pub async fn stats(&self) -> Option<HistoryStats> {
        HistoryStats::from_entries(&self.state.snapshot_lock().read().await.history)
    }
}

/// Append to an already locked history, cap it and persist it.
///
/// Callers hold the snapshot write lock so the append lands together with
/// whatever else they update.
pub(crate) async fn append_entry(
    storage: &dyn KeyValueStore,
    history: &mut Vec<ScoreHistoryEntry>,
    score: i64,
    context: HistoryContext,
) -> ScoreHistoryEntry {
    let entry = ScoreHistoryEntry::capture(score, context, Utc::now());
    history.push(entry.clone());
    keep_most_recent(history);

    match HistoryRepository::put(storage, history).await {
        Ok(()) => debug!(score, entries = history.len(), "History entry appended"),
        Err(e) => warn!(error = %e, "Failed to persist score history; keeping in memory"),
    }

    entry
}

/// Drop the oldest entries beyond the cap; returns how many were dropped
fn keep_most_recent(history: &mut Vec<ScoreHistoryEntry>) -> usize {
    let excess = history.len().saturating_sub(MAX_HISTORY_ENTRIES);
    history.drain(..excess);
    excess
}
