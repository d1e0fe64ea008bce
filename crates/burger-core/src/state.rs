//! # Root State
//!
//! The whole client state tree and the action type that addresses it.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  AppAction::Burger(..)       ──►  RootState.burger           │
//! │  AppAction::Ingredients(..)  ──►  RootState.ingredients      │
//! │  AppAction::Orders(..)       ──►  RootState.orders           │
//! │  AppAction::Feed(..)         ──►  RootState.feed             │
//! │  AppAction::User(..)         ──►  RootState.user             │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//! Each action reaches exactly one slice. Slice actions convert into
//! `AppAction` with `.into()`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::slice::Reducer;
use crate::slices::{
    BurgerAction, BurgerState, FeedAction, FeedState, IngredientsAction, IngredientsState,
    OrderAction, OrdersState, UserAction, UserState,
};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RootState {
    pub user: UserState,
    pub ingredients: IngredientsState,
    pub feed: FeedState,
    pub burger: BurgerState,
    pub orders: OrdersState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    User(UserAction),
    Ingredients(IngredientsAction),
    Feed(FeedAction),
    Burger(BurgerAction),
    Orders(OrderAction),
}

impl Reducer for RootState {
    type Action = AppAction;

    fn reduce(&mut self, action: AppAction) {
        match action {
            AppAction::User(action) => self.user.reduce(action),
            AppAction::Ingredients(action) => self.ingredients.reduce(action),
            AppAction::Feed(action) => self.feed.reduce(action),
            AppAction::Burger(action) => self.burger.reduce(action),
            AppAction::Orders(action) => self.orders.reduce(action),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<UserAction> for AppAction {
    fn from(action: UserAction) -> Self {
        AppAction::User(action)
    }
}

impl From<IngredientsAction> for AppAction {
    fn from(action: IngredientsAction) -> Self {
        AppAction::Ingredients(action)
    }
}

impl From<FeedAction> for AppAction {
    fn from(action: FeedAction) -> Self {
        AppAction::Feed(action)
    }
}

impl From<BurgerAction> for AppAction {
    fn from(action: BurgerAction) -> Self {
        AppAction::Burger(action)
    }
}

impl From<OrderAction> for AppAction {
    fn from(action: OrderAction) -> Self {
        AppAction::Orders(action)
    }
}
