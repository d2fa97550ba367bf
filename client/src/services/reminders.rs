//! Reminder book - persisted local reminders and their next triggers

use crate::repositories::ReminderRepository;
use crate::state::AppState;
use chrono::NaiveDateTime;
use skinglow_shared::Reminder;
use tokio::sync::RwLockWriteGuard;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::state::Snapshot;

/// Handle on the `reminders` record
pub struct ReminderBook<'a> {
    state: &'a AppState,
}

impl<'a> ReminderBook<'a> {
    pub(crate) fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn load(&self) -> Vec<Reminder> {
        let mut snapshot = self.state.snapshot_lock().write().await;

        let reminders = match ReminderRepository::get(self.state.storage()).await {
            Ok(reminders) => reminders,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable reminders");
                Vec::new()
            }
        };

        snapshot.reminders = reminders.clone();
        reminders
    }

    pub async fn list(&self) -> Vec<Reminder> {
        self.state.snapshot_lock().read().await.reminders.clone()
    }

    pub async fn add(&self, reminder: Reminder) {
        let mut snapshot = self.state.snapshot_lock().write().await;
        debug!(id = %reminder.id, title = %reminder.title, "Reminder added");
        snapshot.reminders.push(reminder);
        self.persist(&snapshot).await;
    }

    /// Remove a reminder; `false` if no reminder has that id
    pub async fn remove(&self, id: Uuid) -> bool {
        let mut snapshot = self.state.snapshot_lock().write().await;
        let before = snapshot.reminders.len();
        snapshot.reminders.retain(|r| r.id != id);

        if snapshot.reminders.len() == before {
            return false;
        }
        self.persist(&snapshot).await;
        true
    }

    /// Enable or disable a reminder; `false` if no reminder has that id
    pub async fn set_enabled(&self, id: Uuid, enabled: bool) -> bool {
        let mut snapshot = self.state.snapshot_lock().write().await;
        let Some(reminder) = snapshot.reminders.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        reminder.enabled = enabled;
        self.persist(&snapshot).await;
        true
    }

    pub async fn clear(&self) {
        let mut snapshot = self.state.snapshot_lock().write().await;
        if let Err(e) = ReminderRepository::delete(self.state.storage()).await {
            warn!(error = %e, "Failed to remove persisted reminders");
        }
        snapshot.reminders.clear();
    }

    /// Enabled reminders with their next trigger after `now`, soonest first
    pub async fn upcoming(&self, now: NaiveDateTime) -> Vec<(NaiveDateTime, Reminder)> {
        let snapshot = self.state.snapshot_lock().read().await;
        let mut upcoming: Vec<_> = snapshot
            .reminders
            .iter()
            .filter_map(|r| r.next_trigger(now).map(|at| (at, r.clone())))
            .collect();
        upcoming.sort_by_key(|(at, _)| *at);
        upcoming
    }

    async fn persist(&self, snapshot: &RwLockWriteGuard<'_, Snapshot>) {
        if let Err(e) = ReminderRepository::put(self.state.storage(), &snapshot.reminders).await {
            warn!(error = %e, "Failed to persist reminders; keeping in memory");
        }
    }
}
