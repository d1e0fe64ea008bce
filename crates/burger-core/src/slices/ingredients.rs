//! # Ingredients Slice
//!
//! The catalog of purchasable ingredients and its load status.
//!
//! ## Load Status
//! ```text
//!   Idle ──Pending──► Loading ──Fulfilled──► Loaded
//!                        │                      │
//!                        └──Rejected──► Failed  └──Pending──► Loading ...
//! ```
//! `is_loaded()` means "catalog data is present and current", not "a
//! request is in flight". Use `is_loading()` for spinners.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::slice::{AsyncPhase, Reducer};
use crate::types::{Ingredient, IngredientType, Order};

/// Message stored when the catalog cannot be fetched.
pub const INGREDIENTS_LOAD_ERROR: &str = "Failed to load ingredients";

/// Where the catalog fetch stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngredientsAction {
    FetchIngredients(AsyncPhase<Vec<Ingredient>>),
    /// Replace the catalog directly (e.g. from a cached copy).
    SetProducts(Vec<Ingredient>),
    SetError(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IngredientsState {
    pub products: Vec<Ingredient>,
    pub status: LoadStatus,
    pub error: Option<String>,
}

impl Reducer for IngredientsState {
    type Action = IngredientsAction;

    fn reduce(&mut self, action: IngredientsAction) {
        match action {
            IngredientsAction::FetchIngredients(AsyncPhase::Pending) => {
                self.status = LoadStatus::Loading;
                self.error = None;
            }
            IngredientsAction::FetchIngredients(AsyncPhase::Fulfilled(products)) => {
                self.products = products;
                self.status = LoadStatus::Loaded;
            }
            IngredientsAction::FetchIngredients(AsyncPhase::Rejected(_)) => {
                self.status = LoadStatus::Failed;
                self.error = Some(INGREDIENTS_LOAD_ERROR.to_string());
            }
            IngredientsAction::SetProducts(products) => self.products = products,
            IngredientsAction::SetError(error) => self.error = error,
        }
    }
}

/// An order broken down against the catalog, as the order-details view
/// shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct OrderComposition {
    /// Distinct ingredients with how many times each appears, in first
    /// appearance order.
    pub items: Vec<(Ingredient, u32)>,
    /// Sum of price × count.
    pub total: u32,
    /// Ids from the order that the catalog does not know.
    pub unknown: Vec<String>,
}

impl IngredientsState {
    /// True once the catalog has been fetched successfully.
    pub fn is_loaded(&self) -> bool {
        self.status == LoadStatus::Loaded
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn find(&self, id: &str) -> Option<&Ingredient> {
        self.products.iter().find(|item| item.id == id)
    }

    pub fn by_type(&self, kind: IngredientType) -> impl Iterator<Item = &Ingredient> {
        self.products.iter().filter(move |item| item.kind == kind)
    }

    /// Counts each ingredient of an order and prices the whole.
    pub fn order_composition(&self, order: &Order) -> OrderComposition {
        let mut items: Vec<(Ingredient, u32)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut unknown = Vec::new();

        for id in &order.ingredients {
            if let Some(&slot) = index.get(id.as_str()) {
                items[slot].1 += 1;
                continue;
            }
            match self.find(id) {
                Some(ingredient) => {
                    index.insert(id.as_str(), items.len());
                    items.push((ingredient.clone(), 1));
                }
                None => unknown.push(id.clone()),
            }
        }

        let total = items.iter().map(|(item, count)| item.price * count).sum();
        OrderComposition {
            items,
            total,
            unknown,
        }
    }
}
