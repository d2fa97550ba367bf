//! SkinGlow Shared Library
//!
//! Domain types, validation and pure score / schedule logic shared by the
//! client crate. Nothing in here performs I/O.

pub mod errors;
pub mod models;
pub mod reminders;
pub mod scoring;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::*;
pub use reminders::{Reminder, ReminderSchedule};
pub use scoring::{score_label, HistoryStats, ScoreBreakdown, SkinScore};
pub use validation::ProfileForm;
