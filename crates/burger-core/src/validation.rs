//! # Validation Module
//!
//! Form checks run before a request leaves the client.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Form                 Checks                                            │
//! │  ────                 ──────                                            │
//! │  Login                email format, password present                    │
//! │  Register             name, email format, password length               │
//! │  Profile update       each changed field, at least one change           │
//! │  Forgot password      email format                                      │
//! │  Reset password       password length, emailed code present             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! The server has the final word. These checks only save a round trip on
//! obviously bad input.
//!
//! ## Usage
//! ```rust
//! use burger_core::validation::{validate_email, validate_password};
//!
//! assert!(validate_email("chef@stellar.burgers").is_ok());
//! assert!(validate_password("123").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{LoginRequest, ProfileUpdate, RegisterRequest, ResetPasswordRequest};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_NAME_LEN: usize = 64;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Exactly one `@` with a non-empty local part
/// - Domain contains a dot that is neither first nor last
/// - No whitespace
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(required("email"));
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("must contain @"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must look like name@domain"));
    }

    match domain.rfind('.') {
        Some(dot) if dot > 0 && dot < domain.len() - 1 => Ok(()),
        _ => Err(invalid("domain is incomplete")),
    }
}

/// Validates a new password. Not used on login, where any stored password
/// must be accepted.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(required("password"));
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}

pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(required("name"));
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// The code from the reset email.
pub fn validate_reset_token(token: &str) -> ValidationResult<()> {
    if token.trim().is_empty() {
        return Err(required("token"));
    }
    Ok(())
}

// =============================================================================
// Form Validators
// =============================================================================

pub fn validate_login(request: &LoginRequest) -> ValidationResult<()> {
    validate_email(&request.email)?;
    if request.password.is_empty() {
        return Err(required("password"));
    }
    Ok(())
}

pub fn validate_registration(request: &RegisterRequest) -> ValidationResult<()> {
    validate_name(&request.name)?;
    validate_email(&request.email)?;
    validate_password(&request.password)
}

/// Rejects an update that changes nothing.
pub fn validate_profile_update(update: &ProfileUpdate) -> ValidationResult<()> {
    if update.is_empty() {
        return Err(ValidationError::NothingToUpdate);
    }
    if let Some(name) = &update.name {
        validate_name(name)?;
    }
    if let Some(email) = &update.email {
        validate_email(email)?;
    }
    if let Some(password) = &update.password {
        validate_password(password)?;
    }
    Ok(())
}

pub fn validate_password_reset(request: &ResetPasswordRequest) -> ValidationResult<()> {
    validate_password(&request.password)?;
    validate_reset_token(&request.token)
}

fn required(field: &str) -> ValidationError {
    ValidationError::Required {
        field: field.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
