//! # CLI Error Type
//!
//! What a failed command prints: a machine-readable code plus a message.
//!
//! ```text
//! $ burger order history
//! error [NOT_AUTHENTICATED]: Not signed in
//! ```

use burger_client::ClientError;
use burger_core::CoreError;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliError {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Bad flags or form input.
    ValidationError,
    /// Command needs a signed-in user.
    NotAuthenticated,
    /// Guest-only command run while signed in.
    AlreadySignedIn,
    NotFound,
    /// Burger is not ready for checkout.
    BurgerIncomplete,
    OrderInFlight,
    /// The server answered with an error.
    ApiError,
    /// The server could not be reached or answered garbage.
    NetworkError,
    ConfigError,
    Internal,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::NotAuthenticated => "NOT_AUTHENTICATED",
            ErrorCode::AlreadySignedIn => "ALREADY_SIGNED_IN",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::BurgerIncomplete => "BURGER_INCOMPLETE",
            ErrorCode::OrderInFlight => "ORDER_IN_FLIGHT",
            ErrorCode::ApiError => "API_ERROR",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        CliError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::IngredientNotFound(id) => CliError::not_found("Ingredient", id),
            CoreError::MissingBun | CoreError::NoFillings => {
                CliError::new(ErrorCode::BurgerIncomplete, err.to_string())
            }
            CoreError::Validation(e) => CliError::validation(e.to_string()),
        }
    }
}

impl From<ClientError> for CliError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Core(e) => e.into(),
            ClientError::NotAuthenticated => {
                CliError::new(ErrorCode::NotAuthenticated, err.to_string())
            }
            ClientError::OrderInFlight => CliError::new(ErrorCode::OrderInFlight, err.to_string()),
            ClientError::Status { status: 401 | 403, .. } => {
                CliError::new(ErrorCode::NotAuthenticated, err.to_string())
            }
            ClientError::Status { status: 404, .. } => {
                CliError::new(ErrorCode::NotFound, err.to_string())
            }
            ClientError::Status { .. } | ClientError::Api(_) => {
                CliError::new(ErrorCode::ApiError, err.to_string())
            }
            ClientError::Transport(_) | ClientError::Decode(_) => {
                CliError::new(ErrorCode::NetworkError, err.to_string())
            }
            ClientError::InvalidConfig(_)
            | ClientError::InvalidUrl(_)
            | ClientError::ConfigLoadFailed(_) => {
                CliError::new(ErrorCode::ConfigError, err.to_string())
            }
            ClientError::Credentials(e) => {
                tracing::error!("Credential storage failed: {}", e);
                CliError::new(ErrorCode::Internal, "Could not access the stored session")
            }
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for CliError {}

pub type CliResult<T> = Result<T, CliError>;
