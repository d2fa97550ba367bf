//! File-backed store: one JSON file per key inside a data directory

use async_trait::async_trait;
use skinglow_shared::StoreError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use super::KeyValueStore;

/// Key-value store persisted as `<dir>/<key>.json`.
///
/// Writes go to a temporary file that is synced and then renamed over the
/// record, so a crash leaves either the old or the new value.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        if key.is_empty() || key.contains(['/', '\\', '.']) {
            return Err(StoreError::Unavailable(format!("invalid key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!(".{}.json.tmp", key));

        fs::create_dir_all(&self.dir).await?;

        let mut file = fs::File::create(&tmp).await?;
        file.write_all(value.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&tmp, &path).await?;
        debug!(key, bytes = value.len(), "Record written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key, "Record removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("user").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        store.set("analysis", r#"{"score":80}"#).await.unwrap();
        assert_eq!(
            store.get("analysis").await.unwrap().as_deref(),
            Some(r#"{"score":80}"#)
        );
        assert!(dir.path().join("nested/analysis.json").exists());
        assert!(!dir.path().join("nested/.analysis.json.tmp").exists());

        store.remove("analysis").await.unwrap();
        assert_eq!(store.get("analysis").await.unwrap(), None);
        // Removing twice is fine
        store.remove("analysis").await.unwrap();
    }

    #[tokio::test]
    async fn test_overwrite_replaces_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.set("user", "first").await.unwrap();
        store.set("user", "second").await.unwrap();
        assert_eq!(store.get("user").await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.set("../escape", "x").await.is_err());
        assert!(store.get("").await.is_err());
    }
}
