//! Client-side form checks. Failures block submission and never reach the
//! network.

use thiserror::Error;

pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid email")]
    InvalidEmail,

    #[error("Password should be at least 8 characters")]
    PasswordTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Loose shape check: no whitespace, and an `@` with something on both sides.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let has_whitespace = email.chars().any(char::is_whitespace);
    let has_separator = email
        .char_indices()
        .any(|(i, c)| c == '@' && i > 0 && i + 1 < email.len());
    if has_whitespace || !has_separator {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

pub fn validate_confirmation(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Checks for the signup form, in field order.
pub fn validate_signup(
    email: &str,
    password: &str,
    confirmation: &str,
) -> Result<(), ValidationError> {
    validate_email(email)?;
    validate_new_password(password, confirmation)
}

/// Checks for the reset-password form.
pub fn validate_new_password(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    validate_password(password)?;
    validate_confirmation(password, confirmation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(validate_email("a@b.com").is_ok());
        assert!(validate_email("a@b").is_ok());
        assert!(validate_email("first.last+tag@example.co.uk").is_ok());

        assert_eq!(validate_email(""), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("ab.com"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("@b.com"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("a@"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("a b@c.com"), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_password_length() {
        assert_eq!(validate_password("short"), Err(ValidationError::PasswordTooShort));
        assert!(validate_password("12345678").is_ok());
        // Counted in characters, not bytes.
        assert_eq!(validate_password("ééééééé"), Err(ValidationError::PasswordTooShort));
    }

    #[test]
    fn test_signup_order() {
        assert_eq!(
            validate_signup("bad", "short", "other"),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_signup("a@b.com", "short", "other"),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(
            validate_signup("a@b.com", "longenough", "different"),
            Err(ValidationError::PasswordMismatch)
        );
        assert!(validate_signup("a@b.com", "longenough", "longenough").is_ok());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationError::PasswordTooShort.to_string(),
            "Password should be at least 8 characters"
        );
    }
}
