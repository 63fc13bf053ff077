//! JSON-file credential backend.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{CredentialStore, StoreError, StoredCredentials};

/// Credential file name inside the data directory.
const CREDENTIALS_FILE: &str = "credentials.json";

/// Stores the credential record as one JSON file in an app-private directory.
///
/// Writes go to a temporary file that is synced and renamed into place, so a
/// record observed on disk is always complete.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the given data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: data_dir.into().join(CREDENTIALS_FILE),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn write_record(path: &Path, contents: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");
    let mut file = std::fs::File::create(&tmp)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    drop(file);
    std::fs::rename(&tmp, path)?;
    Ok(())
}

fn read_record(path: &Path) -> Result<Option<StoredCredentials>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&contents)?))
}

#[async_trait]
impl CredentialStore for FileStore {
    async fn save(&self, creds: &StoredCredentials) -> Result<(), StoreError> {
        let path = self.path.clone();
        let contents = serde_json::to_string_pretty(creds)?;
        tokio::task::spawn_blocking(move || write_record(&path, &contents))
            .await
            .map_err(|e| StoreError::TaskFailed(e.to_string()))??;
        debug!(path = %self.path.display(), "credential record written");
        Ok(())
    }

    async fn load(&self) -> Result<Option<StoredCredentials>, StoreError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || read_record(&path))
            .await
            .map_err(|e| StoreError::TaskFailed(e.to_string()))?
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_from_fresh_directory_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        let creds = StoredCredentials::new("asha@example.com", "$argon2id$stub");
        store.save(&creds).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, creds);
    }

    #[tokio::test]
    async fn test_second_save_replaces_the_record() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());

        store
            .save(&StoredCredentials::new("old@example.com", "$old"))
            .await
            .unwrap();
        let newer = StoredCredentials::new("new@example.com", "$new");
        store.save(&newer).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded.email, "new@example.com");
        assert_eq!(loaded.password_hash, "$new");
    }

    #[tokio::test]
    async fn test_save_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("data"));

        store
            .save(&StoredCredentials::new("asha@example.com", "$h"))
            .await
            .unwrap();
        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_surfaces_invalid_record() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        std::fs::write(store.path(), "not json").unwrap();

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidRecord(_)));
    }
}
