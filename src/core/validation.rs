//! Input validation for pnut operations.
//!
//! Everything here runs before the first store write, so a rejected input
//! never leaves partial state behind.

use crate::core::constants::MIN_PASSWORD_LENGTH;
use crate::error::{Error, Result, ValidationError};

/// Validate an email address.
///
/// Accepts `local@domain.tld`: exactly one `@`, no whitespace, a non-empty
/// local part, and a domain with a dot that is neither its first nor last
/// character.
///
/// # Errors
///
/// Returns `ValidationError::InvalidEmail` otherwise.
pub fn validate_email(email: &str) -> Result<()> {
    let invalid = || Error::from(ValidationError::InvalidEmail(email.to_string()));

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };
    if local.is_empty() {
        return Err(invalid());
    }

    let last = domain.len().saturating_sub(1);
    let dotted = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i < last);
    if !dotted {
        return Err(invalid());
    }
    Ok(())
}

/// Symbols that count towards the password policy.
const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

/// Validate a new password.
///
/// Requires the minimum length plus at least one lowercase letter, one
/// uppercase letter, one digit and one symbol.
///
/// # Errors
///
/// Returns `ValidationError::WeakPassword` naming the first unmet rule.
pub fn validate_password(password: &str) -> Result<()> {
    let weak = |reason: String| -> Result<()> { Err(ValidationError::WeakPassword(reason).into()) };

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return weak(format!("must be at least {} characters", MIN_PASSWORD_LENGTH));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return weak("needs a lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return weak("needs an uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return weak("needs a digit".to_string());
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        return weak("needs a symbol".to_string());
    }
    Ok(())
}

/// Validate an alias name.
///
/// Names are matched exactly and passed on a command line, so they must be
/// a single non-empty word.
pub fn validate_alias(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        Some("cannot be empty")
    } else if name.chars().any(char::is_whitespace) {
        Some("cannot contain whitespace")
    } else if name.chars().any(char::is_control) {
        Some("cannot contain control characters")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ValidationError::InvalidAlias {
            name: name.to_string(),
            reason: reason.to_string(),
        }
        .into()),
        None => Ok(()),
    }
}

/// Reject empty or whitespace-only input.
pub fn validate_not_empty(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field).into());
    }
    Ok(())
}

/// Enforce the length limit, counted in characters.
///
/// # Errors
///
/// Returns `Error::Capacity` when `value` is longer than `max`.
pub fn validate_length(field: &'static str, value: &str, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len > max {
        return Err(Error::Capacity { field, len, max });
    }
    Ok(())
}

/// Validate file permissions (Unix only).
///
/// # Errors
///
/// Returns `ValidationError::InvalidPermissions` if the mode differs.
#[cfg(unix)]
pub fn validate_file_permissions(path: &std::path::Path, expected_mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = std::fs::metadata(path)?;
    let actual_mode = metadata.permissions().mode() & 0o777;

    if actual_mode != expected_mode {
        return Err(ValidationError::InvalidPermissions {
            path: path.display().to_string(),
            expected: format!("{:o}", expected_mode),
            actual: format!("{:o}", actual_mode),
        }
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("alice@example.com").is_ok());
        assert!(validate_email("a.b+tag@sub.example.co").is_ok());
        assert!(validate_email("x@y.z").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        assert!(validate_email("").is_err());
        assert!(validate_email("alice").is_err());
        assert!(validate_email("alice@").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("alice@example").is_err());
        assert!(validate_email("alice@.com").is_err());
        assert!(validate_email("alice@example.").is_err());
        assert!(validate_email("al ice@example.com").is_err());
        assert!(validate_email("a@b@example.com").is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("Sh0rt!").is_err());
        assert!(validate_password("alllowercase1!").is_err());
        assert!(validate_password("ALLUPPERCASE1!").is_err());
        assert!(validate_password("NoDigitsHere!").is_err());
        assert!(validate_password("NoSymbols123").is_err());
        assert!(validate_password("Str0ng!pass").is_ok());
    }

    #[test]
    fn test_alias_names() {
        assert!(validate_alias("deploy").is_ok());
        assert!(validate_alias("k8s-logs_v2").is_ok());
        assert!(validate_alias("").is_err());
        assert!(validate_alias("two words").is_err());
        assert!(validate_alias("tab\there").is_err());
    }

    #[test]
    fn test_length_counts_characters() {
        // 4 characters, 8 bytes
        assert!(validate_length("text", "ñañá", 4).is_ok());
        let err = validate_length("text", "abcde", 4).unwrap_err();
        assert!(matches!(
            err,
            Error::Capacity {
                field: "text",
                len: 5,
                max: 4
            }
        ));
    }

    #[test]
    fn test_not_empty() {
        assert!(validate_not_empty("text", "x").is_ok());
        assert!(validate_not_empty("text", "  \n").is_err());
    }
}
