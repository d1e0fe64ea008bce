//! # Slice Primitives
//!
//! A slice is an isolated partition of client state with one reducing
//! function. Async flows never touch state directly: they report their
//! three phases as actions and the owning slice reduces them.
//!
//! ```text
//!   flow starts ──► AsyncPhase::Pending ─────────┐
//!                                                ▼
//!   API answers ──► AsyncPhase::Fulfilled(T) ──► reduce(&mut state, action)
//!                                                ▲
//!   API fails ────► AsyncPhase::Rejected(msg) ───┘
//! ```
//!
//! Phases of one flow arrive in order; phases of different flows may
//! interleave freely.

/// Transforms a slice's state in response to an action.
///
/// `reduce` must be total and deterministic: no I/O, no panics, no
/// failure path.
pub trait Reducer {
    /// The action type this slice handles.
    type Action;

    fn reduce(&mut self, action: Self::Action);
}

/// One observable phase of an async flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsyncPhase<T> {
    /// The request has been issued.
    Pending,
    /// The request completed with a payload.
    Fulfilled(T),
    /// The request failed; carries a display message (may be empty).
    Rejected(String),
}

impl<T> AsyncPhase<T> {
    /// Builds the final phase from a flow's outcome.
    pub fn settle<E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => AsyncPhase::Fulfilled(value),
            Err(err) => AsyncPhase::Rejected(err.to_string()),
        }
    }
}

/// Picks the failure message, or the fallback when the failure had none.
pub(crate) fn message_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
