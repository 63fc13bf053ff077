//! Login and registration state machine.
//!
//! `AuthFlow` replaces the screen-bound view model of the mobile shells with
//! an explicit state machine: every accepted submission moves
//! `Idle -> Loading -> terminal`, and the terminal outcome is what the shell
//! reacts to (navigate on success, show the message on failure).

use std::sync::Arc;

use anyhow::{anyhow, Result};
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::validate::{valid_email, MIN_PASSWORD_LEN};
use crate::config::Config;
use crate::store::{CredentialStore, FileStore, StoredCredentials};

/// Outcome of a login or registration attempt.
///
/// `Idle` is the initial state and `Loading` is held while a submission is
/// being resolved; the remaining variants are terminal. A terminal state is
/// only replaced by another explicit `login`/`register` call (or `reset`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Idle,
    Loading,
    LoginSuccess,
    RegisterSuccess,
    Failed(AuthError),
}

impl AuthState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AuthState::LoginSuccess | AuthState::RegisterSuccess | AuthState::Failed(_)
        )
    }
}

/// Why a login or registration attempt failed.
///
/// `Display` is the user-readable message for the shell; `reason` is the
/// stable machine-readable code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("No saved credentials found")]
    NoCredentials,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Something went wrong: {0}")]
    Storage(String),

    #[error("Another submission is already in progress")]
    Busy,
}

impl AuthError {
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::Validation(_) => "validation",
            AuthError::NoCredentials => "no-credentials",
            AuthError::InvalidCredentials => "invalid-credentials",
            AuthError::Storage(_) => "exception",
            AuthError::Busy => "busy",
        }
    }
}

/// The sign-in/registration flow over an injected credential store.
///
/// One instance can be shared by the screens observing it: submissions take
/// `&self`, and a second submission arriving while one is in flight is
/// rejected with `Failed(Busy)` without disturbing the in-flight attempt.
pub struct AuthFlow {
    store: Arc<dyn CredentialStore>,
    state: Mutex<AuthState>,
    gate: tokio::sync::Mutex<()>,
}

impl AuthFlow {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self {
            store,
            state: Mutex::new(AuthState::Idle),
            gate: tokio::sync::Mutex::new(()),
        }
    }

    /// Flow backed by the app's on-disk credential store.
    pub fn open_default() -> Result<Self> {
        let data_dir = Config::data_dir()?;
        Ok(Self::new(Arc::new(FileStore::new(data_dir))))
    }

    /// Current state, as last observed by the shell.
    pub fn state(&self) -> AuthState {
        self.state.lock().clone()
    }

    /// User-readable message for the current failure, if any.
    pub fn error_message(&self) -> Option<String> {
        match &*self.state.lock() {
            AuthState::Failed(e) => Some(e.to_string()),
            _ => None,
        }
    }

    /// Return to `Idle`, e.g. when the shell leaves the login/signup screen.
    pub fn reset(&self) {
        *self.state.lock() = AuthState::Idle;
    }

    /// Check submitted credentials against the stored pair.
    pub async fn login(&self, email: &str, password: &str) -> AuthState {
        let Ok(_guard) = self.gate.try_lock() else {
            return AuthState::Failed(AuthError::Busy);
        };
        self.set_state(AuthState::Loading);
        let state = match self.check_login(email, password).await {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "login attempt failed to resolve");
                AuthState::Failed(AuthError::Storage(e.to_string()))
            }
        };
        self.set_state(state.clone());
        state
    }

    /// Validate the signup form and persist a new credential pair.
    ///
    /// A successful registration overwrites whatever pair was stored before;
    /// only the newest pair is accepted by subsequent logins.
    pub async fn register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> AuthState {
        let Ok(_guard) = self.gate.try_lock() else {
            return AuthState::Failed(AuthError::Busy);
        };
        self.set_state(AuthState::Loading);
        let state = match self
            .check_register(full_name, email, password, confirm_password)
            .await
        {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "registration attempt failed to resolve");
                AuthState::Failed(AuthError::Storage(e.to_string()))
            }
        };
        self.set_state(state.clone());
        state
    }

    fn set_state(&self, state: AuthState) {
        *self.state.lock() = state;
    }

    async fn check_login(&self, email: &str, password: &str) -> Result<AuthState> {
        if email.is_empty() || password.is_empty() {
            return Ok(AuthState::Failed(AuthError::Validation(
                "Email and password cannot be empty".to_string(),
            )));
        }

        let Some(stored) = self.store.load().await? else {
            debug!("login attempted with no stored credentials");
            return Ok(AuthState::Failed(AuthError::NoCredentials));
        };

        // The hash check runs even when the email does not match, so both
        // mismatch cases take the same path.
        let email_matches = stored.email == email;
        let submitted = password.to_string();
        let hash = stored.password_hash.clone();
        let password_matches = tokio::task::spawn_blocking(move || verify_password(&submitted, &hash))
            .await
            .map_err(|e| anyhow!("verification task failed: {e}"))??;

        if email_matches && password_matches {
            info!("login succeeded");
            Ok(AuthState::LoginSuccess)
        } else {
            debug!("login rejected, credentials do not match stored pair");
            Ok(AuthState::Failed(AuthError::InvalidCredentials))
        }
    }

    async fn check_register(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<AuthState> {
        let problem = if full_name.is_empty() {
            Some("Please enter full name")
        } else if email.is_empty() {
            Some("Please enter email")
        } else if !valid_email(email) {
            Some("Please enter a valid email")
        } else if password.is_empty() {
            Some("Please enter password")
        } else if password != confirm_password {
            Some("Passwords don't match")
        } else if password.chars().count() < MIN_PASSWORD_LEN {
            Some("Password must be at least 6 characters")
        } else {
            None
        };
        if let Some(message) = problem {
            return Ok(AuthState::Failed(AuthError::Validation(
                message.to_string(),
            )));
        }

        let submitted = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&submitted))
            .await
            .map_err(|e| anyhow!("hashing task failed: {e}"))??;

        self.store
            .save(&StoredCredentials::new(email, password_hash))
            .await?;
        info!("credential slot updated");
        Ok(AuthState::RegisterSuccess)
    }
}

// ============================================================================
// Tests
// ============================================================================
