//! # burger-core: Pure State Layer for Stellar Burgers
//!
//! This crate is the **heart** of the burger shop client. It holds every
//! piece of client state and every rule for changing it, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Stellar Burgers Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Front-end (CLI / web views)                     │   │
//! │  │   Catalog ──► Constructor ──► Checkout ──► Feed / Profile       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ dispatch / select                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              burger-client (Store + async flows)                │   │
//! │  │   fetch_ingredients, create_order, login, check_user_auth ...   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ AppAction                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ burger-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │  ┌────────────┐ ┌────────┐ ┌────────┐ ┌──────┐ ┌──────┐        │   │
//! │  │  │ingredients │ │ burger │ │ orders │ │ feed │ │ user │        │   │
//! │  │  └────────────┘ └────────┘ └────────┘ └──────┘ └──────┘        │   │
//! │  │                     composed by RootState                       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE REDUCERS                           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Ingredient, Order, User, feed payloads)
//! - [`slice`] - The `Reducer` trait and `AsyncPhase` outcomes
//! - [`slices`] - The five state slices
//! - [`state`] - `RootState`, the composed state tree
//! - [`validation`] - Form and checkout validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Reducers**: same state + same action = same next state
//! 2. **No I/O**: network and storage live in burger-client
//! 3. **Total Operations**: reducers never fail; failures arrive as
//!    `AsyncPhase::Rejected(message)` and are stored for display
//!
//! ## Example Usage
//!
//! ```rust
//! use burger_core::slices::burger::BurgerAction;
//! use burger_core::{Ingredient, IngredientType, Reducer, RootState};
//!
//! let bun = Ingredient::new("b1", "Fluorescent bun", IngredientType::Bun, 988);
//!
//! let mut state = RootState::default();
//! state.reduce(BurgerAction::add(bun).into());
//!
//! assert_eq!(state.burger.total_price(), 988 * 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod slice;
pub mod slices;
pub mod state;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use slice::{AsyncPhase, Reducer};
pub use state::{AppAction, RootState};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// How many times the bun is counted in price and in the submitted order.
///
/// One bun ingredient stands for the top and the bottom of the burger, so
/// the API expects its id twice and the price counts it twice.
pub const BUN_PORTIONS: u32 = 2;
