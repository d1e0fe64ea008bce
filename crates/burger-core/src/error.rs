//! # Error Types
//!
//! Domain-specific error types for burger-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  burger-core errors (this file)                                        │
//! │  ├── CoreError        - Checkout / catalog rule violations             │
//! │  └── ValidationError  - Form input failures                            │
//! │                                                                         │
//! │  burger-client errors (separate crate)                                 │
//! │  └── ClientError      - Transport, API, config, credentials            │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the user sees (code + message)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → CliError            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reducers never return these. Slices only ever store display strings;
//! these types guard the entry points (forms, checkout) before a flow
//! is dispatched.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations in the burger shop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Ingredient id is not in the loaded catalog.
    #[error("Ingredient not found: {0}")]
    IngredientNotFound(String),

    /// Checkout attempted without a bun.
    #[error("A burger needs a bun")]
    MissingBun,

    /// Checkout attempted with a bun but nothing between the halves.
    #[error("A burger needs at least one filling")]
    NoFillings,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for auth and profile forms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A profile update that changes nothing.
    #[error("Nothing to update")]
    NothingToUpdate,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
