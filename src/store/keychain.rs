//! OS-keychain credential backend.

use async_trait::async_trait;
use keyring::Entry;
use tracing::debug;

use super::{CredentialStore, StoreError, StoredCredentials};

/// Keychain service name for SafeBridge entries.
const SERVICE_NAME: &str = "safebridge";

/// Keychain account holding the single credential record.
const SLOT_NAME: &str = "credentials";

/// Stores the serialized credential record as one entry in the OS keychain.
pub struct KeychainStore {
    service: String,
}

impl KeychainStore {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    /// Use a different keychain service name, isolating this store's entry
    /// from the default one.
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }
}

impl Default for KeychainStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for KeychainStore {
    async fn save(&self, creds: &StoredCredentials) -> Result<(), StoreError> {
        let service = self.service.clone();
        let contents = serde_json::to_string(creds)?;
        tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
            let entry = Entry::new(&service, SLOT_NAME)?;
            entry.set_password(&contents)?;
            Ok(())
        })
        .await
        .map_err(|e| StoreError::TaskFailed(e.to_string()))??;
        debug!(service = %self.service, "credential record written to keychain");
        Ok(())
    }

    async fn load(&self) -> Result<Option<StoredCredentials>, StoreError> {
        let service = self.service.clone();
        tokio::task::spawn_blocking(move || -> Result<Option<StoredCredentials>, StoreError> {
            let entry = Entry::new(&service, SLOT_NAME)?;
            match entry.get_password() {
                Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
                Err(keyring::Error::NoEntry) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(|e| StoreError::TaskFailed(e.to_string()))?
    }
}
