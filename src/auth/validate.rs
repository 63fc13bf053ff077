//! Input validation for the sign-in and registration forms.

use regex::Regex;

/// Minimum password length accepted at registration (characters, not bytes).
pub const MIN_PASSWORD_LEN: usize = 6;

/// Basic email format check.
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email))
}

// ============================================================================
// Tests
// ============================================================================
