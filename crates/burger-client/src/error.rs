//! # Client Error Types
//!
//! Failures of configuration, credential storage and the burger API.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     API                 │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Transport      │  │  Status (non-2xx)       │ │
//! │  │  InvalidUrl     │  │  Decode         │  │  Api (success: false)   │ │
//! │  │  ConfigLoad     │  │                 │  │  NotAuthenticated       │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │  Credentials    │  │   Flow guards   │                              │
//! │  │                 │  │                 │                              │
//! │  │  Credentials    │  │  OrderInFlight  │                              │
//! │  │                 │  │  Core           │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Flows never let these escape into state as anything but a display
//! string: the store turns every error into `AsyncPhase::Rejected`.

use burger_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request never produced a response.
    #[error("Request failed: {0}")]
    Transport(String),

    /// Response body did not match the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    // =========================================================================
    // API Errors
    // =========================================================================
    /// Non-2xx response. `message` comes from the body when it has one.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// 2xx response with `success: false`.
    #[error("{0}")]
    Api(String),

    /// An authorized endpoint was called with no usable session.
    #[error("Not signed in")]
    NotAuthenticated,

    // =========================================================================
    // Local Errors
    // =========================================================================
    #[error("Credential storage error: {0}")]
    Credentials(String),

    /// A checkout was attempted while another is still running.
    #[error("An order is already being placed")]
    OrderInFlight,

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ClientError {
    /// True when the server says the access token has expired.
    pub fn is_jwt_expired(&self) -> bool {
        match self {
            ClientError::Status { message, .. } | ClientError::Api(message) => {
                message.contains("jwt expired")
            }
            _ => false,
        }
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::Core(CoreError::Validation(err))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Credentials(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_displays_server_message() {
        let err = ClientError::Status {
            status: 401,
            message: "email or password are incorrect".to_string(),
        };
        assert_eq!(err.to_string(), "email or password are incorrect");
    }

    #[test]
    fn test_jwt_expired_detection() {
        let expired = ClientError::Status {
            status: 403,
            message: "jwt expired".to_string(),
        };
        assert!(expired.is_jwt_expired());
        assert!(ClientError::Api("jwt expired".to_string()).is_jwt_expired());
        assert!(!ClientError::NotAuthenticated.is_jwt_expired());
    }

    #[test]
    fn test_validation_converts_to_core() {
        let err: ClientError = ValidationError::NothingToUpdate.into();
        assert!(matches!(
            err,
            ClientError::Core(CoreError::Validation(ValidationError::NothingToUpdate))
        ));
    }
}
