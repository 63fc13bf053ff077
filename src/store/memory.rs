//! In-memory credential backend for tests and shell previews.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{CredentialStore, StoreError, StoredCredentials};

/// Holds the credential record in process memory; nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    slot: RwLock<Option<StoredCredentials>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn save(&self, creds: &StoredCredentials) -> Result<(), StoreError> {
        *self.slot.write().await = Some(creds.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<StoredCredentials>, StoreError> {
        Ok(self.slot.read().await.clone())
    }
}

// ============================================================================
// Tests
// ============================================================================
