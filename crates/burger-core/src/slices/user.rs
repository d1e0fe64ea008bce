//! # User Slice
//!
//! Session state: who is signed in, whether that has been determined yet,
//! and the progress of the credential flows.
//!
//! ## The Auth-Checked Latch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  is_auth_checked   user        Meaning                 Guard decision   │
//! │  ───────────────   ────        ───────                 ──────────────   │
//! │  false             -           not determined yet      Pending (wait)   │
//! │  true              None        determined: anonymous   login redirect   │
//! │  true              Some(u)     determined: signed in   allow            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! The latch only ever goes from false to true. Guards must wait while it
//! is false, otherwise a returning customer sees a flash of the login page.
//!
//! ## Logout
//! The session ends locally whatever the server says: the user is cleared
//! on both outcomes, and a rejection additionally records the error. The
//! client layer clears stored credentials on both outcomes too, so memory
//! and storage never disagree.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::slice::{message_or, AsyncPhase, Reducer};
use crate::types::User;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// `None` when no credentials were stored.
    CheckUserAuth(AsyncPhase<Option<User>>),
    FetchUser(AsyncPhase<User>),
    Login(AsyncPhase<User>),
    Register(AsyncPhase<User>),
    UpdateProfile(AsyncPhase<User>),
    Logout(AsyncPhase<()>),
    ForgotPassword(AsyncPhase<()>),
    ResetPassword(AsyncPhase<()>),
    /// Dismiss the error banner.
    ResetError,
    /// Dismiss both password reset banners.
    ResetPasswordResetState,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct UserState {
    pub user: Option<User>,
    pub is_auth_checked: bool,
    pub error: Option<String>,
    pub loading: bool,
    /// Reset email was requested.
    pub password_reset_request: bool,
    /// Password was reset with the emailed code.
    pub password_reset_success: bool,
}

/// Outcome of a route guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RouteAccess {
    /// Auth not determined yet: show a loader.
    Pending,
    Allow,
    /// Protected route, nobody signed in.
    RedirectToLogin,
    /// Guest-only route (login, register), somebody signed in.
    RedirectHome,
}

impl Reducer for UserState {
    type Action = UserAction;

    fn reduce(&mut self, action: UserAction) {
        match action {
            UserAction::CheckUserAuth(phase) => match phase {
                // Does not clear a previous error.
                AsyncPhase::Pending => self.loading = true,
                AsyncPhase::Fulfilled(user) => {
                    self.user = user;
                    self.is_auth_checked = true;
                    self.loading = false;
                }
                AsyncPhase::Rejected(message) => {
                    self.is_auth_checked = true;
                    self.loading = false;
                    self.error = Some(message_or(message, "Auth check failed"));
                }
            },

            UserAction::FetchUser(phase) => match phase {
                AsyncPhase::Pending => self.start(),
                AsyncPhase::Fulfilled(user) => {
                    self.user = Some(user);
                    self.loading = false;
                    self.is_auth_checked = true;
                }
                AsyncPhase::Rejected(message) => {
                    self.loading = false;
                    self.user = None;
                    self.is_auth_checked = true;
                    self.error = Some(message_or(message, "Failed to fetch user"));
                }
            },

            UserAction::Login(phase) => self.reduce_user_flow(phase, "Login failed"),
            UserAction::Register(phase) => self.reduce_user_flow(phase, "Registration failed"),
            UserAction::UpdateProfile(phase) => {
                self.reduce_user_flow(phase, "Profile update failed")
            }

            UserAction::Logout(phase) => match phase {
                AsyncPhase::Pending => self.start(),
                AsyncPhase::Fulfilled(()) => {
                    self.user = None;
                    self.loading = false;
                }
                AsyncPhase::Rejected(message) => {
                    self.user = None;
                    self.loading = false;
                    self.error = Some(message_or(message, "Logout failed"));
                }
            },

            UserAction::ForgotPassword(phase) => match phase {
                AsyncPhase::Pending => self.start(),
                AsyncPhase::Fulfilled(()) => {
                    self.loading = false;
                    self.password_reset_request = true;
                }
                AsyncPhase::Rejected(message) => {
                    self.loading = false;
                    self.error = Some(message_or(message, "Password reset request failed"));
                }
            },

            UserAction::ResetPassword(phase) => match phase {
                AsyncPhase::Pending => self.start(),
                AsyncPhase::Fulfilled(()) => {
                    self.loading = false;
                    self.password_reset_success = true;
                }
                AsyncPhase::Rejected(message) => {
                    self.loading = false;
                    self.error = Some(message_or(message, "Password reset failed"));
                }
            },

            UserAction::ResetError => self.error = None,
            UserAction::ResetPasswordResetState => {
                self.password_reset_request = false;
                self.password_reset_success = false;
            }
        }
    }
}

impl UserState {
    fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Login, register and profile update share one shape: the fulfilled
    /// payload becomes the user.
    fn reduce_user_flow(&mut self, phase: AsyncPhase<User>, fallback: &str) {
        match phase {
            AsyncPhase::Pending => self.start(),
            AsyncPhase::Fulfilled(user) => {
                self.user = Some(user);
                self.loading = false;
            }
            AsyncPhase::Rejected(message) => {
                self.loading = false;
                self.error = Some(message_or(message, fallback));
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Route guard decision.
    ///
    /// `guest_only` marks pages such as login and register, which a signed
    /// in user should leave.
    pub fn route_access(&self, guest_only: bool) -> RouteAccess {
        if !self.is_auth_checked {
            return RouteAccess::Pending;
        }
        match (guest_only, self.is_authenticated()) {
            (true, true) => RouteAccess::RedirectHome,
            (false, false) => RouteAccess::RedirectToLogin,
            _ => RouteAccess::Allow,
        }
    }
}
