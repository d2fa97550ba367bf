//! Profile store - the persisted user profile

use crate::repositories::ProfileRepository;
use crate::state::AppState;
use skinglow_shared::UserProfile;
use tracing::{debug, warn};

/// Handle on the `user` record.
///
/// Input validation is the caller's job (see
/// [`skinglow_shared::ProfileForm`]); the store persists whatever complete
/// profile it is given.
pub struct ProfileStore<'a> {
    state: &'a AppState,
}

impl<'a> ProfileStore<'a> {
    pub(crate) fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Read the persisted profile into the snapshot.
    ///
    /// Missing or unreadable data yields `None`.
    pub async fn load(&self) -> Option<UserProfile> {
        let mut snapshot = self.state.snapshot_lock().write().await;

        let profile = match ProfileRepository::get(self.state.storage()).await {
            Ok(profile) => profile,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable profile");
                None
            }
        };

        snapshot.profile = profile.clone();
        profile
    }

    /// Replace the profile in full, durably, then update the snapshot
    pub async fn save(&self, profile: UserProfile) {
        let mut snapshot = self.state.snapshot_lock().write().await;

        match ProfileRepository::put(self.state.storage(), &profile).await {
            Ok(()) => debug!(age = profile.age, "Profile saved"),
            Err(e) => warn!(error = %e, "Failed to persist profile; keeping in memory"),
        }

        snapshot.profile = Some(profile);
    }

    /// Current in-memory profile
    pub async fn current(&self) -> Option<UserProfile> {
        self.state.snapshot_lock().read().await.profile.clone()
    }

    pub async fn is_complete(&self) -> bool {
        self.state.snapshot_lock().read().await.profile.is_some()
    }
}
