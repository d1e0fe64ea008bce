//! # Commands
//!
//! One module per area. Every command follows the same shape:
//!
//! ```text
//!   run flows on the Store ──► select from RootState ──► Output (text | json)
//! ```

pub mod auth;
pub mod catalog;
pub mod feed;
pub mod order;

use burger_client::Store;
use burger_core::slices::RouteAccess;
use burger_core::User;
use serde::Serialize;

use crate::error::{CliError, CliResult, ErrorCode};

/// Where command results go.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Output { json }
    }

    /// Prints `value` as JSON, or the text produced by `text`.
    pub fn emit<T, F>(&self, value: &T, text: F) -> CliResult<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T) -> String,
    {
        if self.json {
            let json = serde_json::to_string_pretty(value)
                .map_err(|e| CliError::new(ErrorCode::Internal, e.to_string()))?;
            println!("{}", json);
        } else {
            println!("{}", text(value));
        }
        Ok(())
    }
}

/// Resolves the session and applies the route guard.
///
/// `guest_only` commands (login, register) refuse to run for a signed-in
/// user; the others require one.
pub async fn guard(store: &Store, guest_only: bool) -> CliResult<Option<User>> {
    // A failed check still latches `is_auth_checked`: it means "anonymous".
    if let Err(err) = store.check_user_auth().await {
        tracing::warn!(error = %err, "Session check failed");
    }

    let (access, user) = store.select(|s| (s.user.route_access(guest_only), s.user.user.clone()));
    match access {
        RouteAccess::Allow => Ok(user),
        RouteAccess::RedirectToLogin => Err(CliError::new(
            ErrorCode::NotAuthenticated,
            "Not signed in. Run `burger login` first.",
        )),
        RouteAccess::RedirectHome => Err(CliError::new(
            ErrorCode::AlreadySignedIn,
            format!(
                "Already signed in as {}. Run `burger logout` first.",
                user.map(|u| u.email).unwrap_or_default()
            ),
        )),
        RouteAccess::Pending => Err(CliError::new(
            ErrorCode::Internal,
            "Session check did not complete",
        )),
    }
}

/// Requires a signed-in user.
pub async fn require_user(store: &Store) -> CliResult<User> {
    guard(store, false)
        .await?
        .ok_or_else(|| CliError::new(ErrorCode::NotAuthenticated, "Not signed in"))
}
