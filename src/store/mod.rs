//! Credential persistence for the sign-in flow.
//!
//! This module provides:
//! - `CredentialStore`: the async storage seam the auth flow is built against
//! - `FileStore`: JSON file in the app-private data directory
//! - `KeychainStore`: single entry in the OS keychain
//! - `MemoryStore`: in-memory slot for tests and shell previews
//!
//! Exactly one credential record exists per backend; `save` replaces it.

pub mod file;
pub mod keychain;
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use file::FileStore;
pub use keychain::KeychainStore;
pub use memory::MemoryStore;

/// The single persisted credential record.
///
/// The password is held as a PHC-format Argon2id hash; plaintext never
/// reaches storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub email: String,
    pub password_hash: String,
    pub updated_at: DateTime<Utc>,
}

impl StoredCredentials {
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid credential record: {0}")]
    InvalidRecord(#[from] serde_json::Error),

    #[error("Keychain error: {0}")]
    Keychain(#[from] ::keyring::Error),

    #[error("Could not find data directory")]
    NoDataDir,

    #[error("Storage task failed: {0}")]
    TaskFailed(String),
}

/// Async storage seam for the single credential slot.
///
/// Implementations must make `save` durable before returning and must not
/// cache reads: a `load` after a `save` always observes the new record.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Overwrite the stored credential record.
    async fn save(&self, creds: &StoredCredentials) -> Result<(), StoreError>;

    /// Read the stored record, or `None` if nothing was ever saved.
    async fn load(&self) -> Result<Option<StoredCredentials>, StoreError>;
}
