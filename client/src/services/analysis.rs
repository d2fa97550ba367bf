//! Analysis cache - the latest skin analysis result

use crate::repositories::AnalysisRepository;
use crate::services::history::append_entry;
use crate::state::AppState;
use skinglow_shared::{AnalysisResult, ScoreHistoryEntry};
use tracing::{debug, info, warn};

/// Handle on the `analysis` record.
///
/// Holds at most one result; every `set` replaces it wholesale.
pub struct AnalysisCache<'a> {
    state: &'a AppState,
}

impl<'a> AnalysisCache<'a> {
    pub(crate) fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Read the persisted result into the snapshot; unreadable data yields `None`
    pub async fn load(&self) -> Option<AnalysisResult> {
        let mut snapshot = self.state.snapshot_lock().write().await;

        let result = match AnalysisRepository::get(self.state.storage()).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable cached analysis");
                None
            }
        };

        snapshot.analysis = result.clone();
        result
    }

    /// Replace the cached result.
    ///
    /// A result with a numeric score also appends a history entry, under the
    /// same lock, and that entry is returned.
    pub async fn set(&self, result: AnalysisResult) -> Option<ScoreHistoryEntry> {
        let mut snapshot = self.state.snapshot_lock().write().await;
        let storage = self.state.storage();

        if let Err(e) = AnalysisRepository::put(storage, &result).await {
            warn!(error = %e, "Failed to persist analysis; keeping in memory");
        }

        let entry = match result.score_value() {
            Some(score) => {
                let context = result.history_context();
                Some(append_entry(storage, &mut snapshot.history, score, context).await)
            }
            None => {
                debug!("Analysis has no numeric score; history unchanged");
                None
            }
        };

        info!(
            skin_type = result.skin_type.as_deref().unwrap_or("unknown"),
            score = ?entry.as_ref().map(|e| e.score),
            "Analysis cached"
        );
        snapshot.analysis = Some(result);
        entry
    }

    /// Remove the cached result; score history is left untouched
    pub async fn clear(&self) {
        let mut snapshot = self.state.snapshot_lock().write().await;

        if let Err(e) = AnalysisRepository::delete(self.state.storage()).await {
            warn!(error = %e, "Failed to remove persisted analysis");
        }
        snapshot.analysis = None;
        debug!("Analysis cleared");
    }

    /// Current in-memory result
    pub async fn current(&self) -> Option<AnalysisResult> {
        self.state.snapshot_lock().read().await.analysis.clone()
    }
}
