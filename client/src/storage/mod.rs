//! Device-local key-value storage
//!
//! Records are opaque strings addressed by a small set of fixed keys. Typed
//! access lives in [`crate::repositories`].

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use skinglow_shared::StoreError;

/// Key of the persisted user profile
pub const USER_KEY: &str = "user";

/// Key of the cached analysis result
pub const ANALYSIS_KEY: &str = "analysis";

/// Key of the score history list
pub const SCORE_HISTORY_KEY: &str = "score_history";

/// Key of the reminder list
pub const REMINDERS_KEY: &str = "reminders";

/// Persistent string key-value storage.
///
/// `set` must be durable before it returns. `remove` of a missing key is not
/// an error.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
