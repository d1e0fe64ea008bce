//! # Account Commands
//!
//! Sign-in, sign-up, profile editing and password recovery. Login and
//! register are guest-only; profile and whoami need a session.

use burger_client::Store;
use burger_core::{LoginRequest, ProfileUpdate, RegisterRequest, ResetPasswordRequest, User};
use clap::{Args, Subcommand};
use serde_json::json;

use super::{guard, require_user, Output};
use crate::error::CliResult;

#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// New display name
    #[arg(long)]
    pub name: Option<String>,

    /// New email address
    #[arg(long)]
    pub email: Option<String>,

    /// New password
    #[arg(long, env = "BURGER_NEW_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum PasswordCommand {
    /// Email a reset code
    Forgot {
        #[arg(long)]
        email: String,
    },

    /// Set a new password with the emailed code
    Reset {
        /// Code from the reset email
        #[arg(long)]
        token: String,

        #[arg(long, env = "BURGER_NEW_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

pub async fn login(store: &Store, out: &Output, email: String, password: String) -> CliResult<()> {
    guard(store, true).await?;
    let user = store.login(LoginRequest { email, password }).await?;
    out.emit(&user, |u| format!("Signed in as {}", describe(u)))
}

pub async fn register(
    store: &Store,
    out: &Output,
    name: String,
    email: String,
    password: String,
) -> CliResult<()> {
    guard(store, true).await?;
    let user = store
        .register(RegisterRequest {
            email,
            name,
            password,
        })
        .await?;
    out.emit(&user, |u| format!("Welcome aboard, {}", describe(u)))
}

pub async fn logout(store: &Store, out: &Output) -> CliResult<()> {
    store.logout().await?;
    out.emit(&json!({ "signedOut": true }), |_| "Signed out".to_string())
}

pub async fn whoami(store: &Store, out: &Output) -> CliResult<()> {
    let user = require_user(store).await?;
    out.emit(&user, describe)
}

pub async fn profile(store: &Store, out: &Output, args: ProfileArgs) -> CliResult<()> {
    let current = require_user(store).await?;
    let update = profile_update(&current, args);

    let user = store.update_profile(update).await?;
    out.emit(&user, |u| format!("Profile saved: {}", describe(u)))
}

pub async fn password(store: &Store, out: &Output, command: PasswordCommand) -> CliResult<()> {
    match command {
        PasswordCommand::Forgot { email } => {
            store.forgot_password(&email).await?;
            out.emit(&json!({ "sent": true, "email": email }), |_| {
                format!("Reset code sent to {}. Run `burger password reset` next.", email)
            })
        }
        PasswordCommand::Reset { token, password } => {
            store
                .reset_password(ResetPasswordRequest { password, token })
                .await?;
            out.emit(&json!({ "reset": true }), |_| {
                "Password changed. Sign in with the new one.".to_string()
            })
        }
    }
}

/// Flags left out keep their current value.
fn profile_update(current: &User, args: ProfileArgs) -> ProfileUpdate {
    let name = args.name.unwrap_or_else(|| current.name.clone());
    let email = args.email.unwrap_or_else(|| current.email.clone());
    let password = args.password.unwrap_or_default();
    ProfileUpdate::diff(current, &name, &email, &password)
}

fn describe(user: &User) -> String {
    format!("{} <{}>", user.name, user.email)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current() -> User {
        User {
            email: "ann@example.com".to_string(),
            name: "Ann".to_string(),
        }
    }

    #[test]
    fn test_profile_update_keeps_missing_flags() {
        let update = profile_update(
            &current(),
            ProfileArgs {
                name: Some("Anna".to_string()),
                email: None,
                password: None,
            },
        );

        assert_eq!(update.name.as_deref(), Some("Anna"));
        assert!(update.email.is_none());
        assert!(update.password.is_none());
    }

    #[test]
    fn test_profile_update_same_values_is_empty() {
        let update = profile_update(
            &current(),
            ProfileArgs {
                name: Some("Ann".to_string()),
                email: Some("ann@example.com".to_string()),
                password: None,
            },
        );

        assert!(update.is_empty());
    }
}
