//! SafeBridge core - credential storage and sign-in flow for the
//! disaster-alert companion app.
//!
//! This crate holds everything below the UI shell: the credential store
//! backends, the login/registration state machine, and application
//! configuration. Screen rendering and navigation live in the shells that
//! consume this library.

pub mod auth;
pub mod config;
pub mod store;

pub use auth::{AuthError, AuthFlow, AuthState};
pub use config::Config;
pub use store::{
    CredentialStore, FileStore, KeychainStore, MemoryStore, StoreError, StoredCredentials,
};
