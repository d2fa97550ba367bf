//! Store services
//!
//! Each service is a borrowed handle on [`crate::state::AppState`] that owns
//! one record's lifecycle. Storage failures stop here: reads fall back to the
//! empty value and writes are best-effort, both with a warning in the log.

pub mod analysis;
pub mod analyze;
pub mod history;
pub mod profile;
pub mod reminders;

pub use analysis::AnalysisCache;
pub use analyze::AnalyzeService;
pub use history::{ScoreHistoryLog, MAX_HISTORY_ENTRIES};
pub use profile::ProfileStore;
pub use reminders::ReminderBook;
