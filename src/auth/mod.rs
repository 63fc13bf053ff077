//! Sign-in and registration flow.
//!
//! This module provides:
//! - `AuthFlow`: the state machine behind the login and signup screens
//! - `hash_password` / `verify_password`: Argon2id credential verification
//! - input validation helpers for the form fields
//!
//! Every accepted submission resolves to a terminal `AuthState`; the flow is
//! never left in `Loading` once a call returns.

pub mod flow;
pub mod password;
pub mod validate;

pub use flow::{AuthError, AuthFlow, AuthState};
pub use password::{hash_password, verify_password};
