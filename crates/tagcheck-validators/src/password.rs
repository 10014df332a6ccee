//! Password validation functions

use std::any::Any;

use tagcheck_core::ErrorValue;

use crate::string::as_str;

pub const PASSWORD_MIN_LENGTH: usize = 8;
pub const PASSWORD_MAX_LENGTH: usize = 128;

/// Checks length bounds and the presence of lowercase, uppercase and digit characters
pub fn is_strong_password(password: &str) -> bool {
    (PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&password.len())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

/// Validator form of [`is_strong_password`]. Never says which requirement failed.
pub fn password(value: &dyn Any) -> Result<(), ErrorValue> {
    match as_str(value) {
        Some(s) if is_strong_password(s) => Ok(()),
        _ => Err("invalid password".into()),
    }
}
