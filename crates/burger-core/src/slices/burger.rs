//! # Burger Constructor Slice
//!
//! Holds the burger being assembled: at most one bun and an ordered list
//! of fillings.
//!
//! ## Constructor Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Constructor Operations                               │
//! │                                                                         │
//! │  User Action              BurgerAction            State Change          │
//! │  ───────────              ────────────            ────────────          │
//! │                                                                         │
//! │  Drop a bun ─────────────► Add(bun) ────────────► old bun replaced     │
//! │                                                                         │
//! │  Drop a filling ─────────► Add(filling) ────────► appended             │
//! │                                                                         │
//! │  Click trash ────────────► Remove { id } ───────► removed; empty → None│
//! │                                                                         │
//! │  Arrow up / down ────────► Move { id, dir } ────► adjacent swap        │
//! │                                                                         │
//! │  Order placed ───────────► Clear ───────────────► None                 │
//! │                                                                         │
//! │  NOTE: every operation is total. Unknown ids and boundary moves are    │
//! │        silent no-ops.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The "No Ingredients" Sentinel
//! An untouched or emptied constructor holds `None`, never `Some(vec![])`.
//! Views rely on that to show the "drop ingredients here" placeholder.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::slice::Reducer;
use crate::types::{ConstructorIngredient, Ingredient};
use crate::BUN_PORTIONS;

/// Direction for reordering a placed ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Actions handled by the constructor slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BurgerAction {
    /// Place an ingredient (placement id already assigned).
    Add(ConstructorIngredient),
    /// Remove the placement with this id.
    Remove { placement_id: String },
    /// Swap the placement with its neighbour.
    Move {
        placement_id: String,
        direction: MoveDirection,
    },
    /// Reset to the "no ingredients" sentinel.
    Clear,
}

impl BurgerAction {
    /// Builds an `Add` action, assigning a fresh placement id.
    ///
    /// The id is generated here rather than in the reducer so that
    /// reducing stays deterministic.
    pub fn add(ingredient: Ingredient) -> Self {
        BurgerAction::Add(ConstructorIngredient::new(ingredient))
    }

    pub fn remove(placement_id: impl Into<String>) -> Self {
        BurgerAction::Remove {
            placement_id: placement_id.into(),
        }
    }

    pub fn move_item(placement_id: impl Into<String>, direction: MoveDirection) -> Self {
        BurgerAction::Move {
            placement_id: placement_id.into(),
            direction,
        }
    }
}

/// The burger being assembled.
///
/// ## Invariants
/// - At most one bun is ever present
/// - `ingredients` is `None` rather than an empty list
/// - Filling order is the order of insertion unless moved
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BurgerState {
    ingredients: Option<Vec<ConstructorIngredient>>,
}

impl Reducer for BurgerState {
    type Action = BurgerAction;

    fn reduce(&mut self, action: BurgerAction) {
        match action {
            BurgerAction::Add(item) => self.add(item),
            BurgerAction::Remove { placement_id } => self.remove(&placement_id),
            BurgerAction::Move {
                placement_id,
                direction,
            } => self.move_item(&placement_id, direction),
            BurgerAction::Clear => self.ingredients = None,
        }
    }
}

impl BurgerState {
    /// Creates an empty constructor.
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, item: ConstructorIngredient) {
        let items = self.ingredients.get_or_insert_with(Vec::new);
        if item.is_bun() {
            items.retain(|existing| !existing.is_bun());
        }
        items.push(item);
    }

    fn remove(&mut self, placement_id: &str) {
        let Some(items) = self.ingredients.as_mut() else {
            return;
        };
        items.retain(|item| item.placement_id != placement_id);
        if items.is_empty() {
            self.ingredients = None;
        }
    }

    fn move_item(&mut self, placement_id: &str, direction: MoveDirection) {
        let Some(items) = self.ingredients.as_mut() else {
            return;
        };
        let Some(index) = items.iter().position(|item| item.placement_id == placement_id) else {
            return;
        };

        let target = match direction {
            MoveDirection::Up if index > 0 => index - 1,
            MoveDirection::Down if index + 1 < items.len() => index + 1,
            _ => return,
        };
        items.swap(index, target);
    }

    // =========================================================================
    // Selectors
    // =========================================================================

    /// Every placed ingredient, or `None` for the sentinel state.
    pub fn ingredients(&self) -> Option<&[ConstructorIngredient]> {
        self.ingredients.as_deref()
    }

    /// True when nothing is placed.
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_none()
    }

    pub fn bun(&self) -> Option<&ConstructorIngredient> {
        self.ingredients
            .as_deref()
            .and_then(|items| items.iter().find(|item| item.is_bun()))
    }

    /// Placed non-bun ingredients, in order.
    pub fn fillings(&self) -> impl Iterator<Item = &ConstructorIngredient> {
        self.ingredients
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|item| !item.is_bun())
    }

    /// Burger price: the bun counts twice (top and bottom).
    pub fn total_price(&self) -> u32 {
        let bun = self
            .bun()
            .map(|bun| bun.ingredient.price * BUN_PORTIONS)
            .unwrap_or(0);
        bun + self.fillings().map(|item| item.ingredient.price).sum::<u32>()
    }

    /// Checks that the burger can be ordered: a bun plus at least one filling.
    pub fn validate_for_order(&self) -> CoreResult<()> {
        if self.bun().is_none() {
            return Err(CoreError::MissingBun);
        }
        if self.fillings().next().is_none() {
            return Err(CoreError::NoFillings);
        }
        Ok(())
    }

    /// Catalog ids to submit, as `[bun, bun, ...fillings]`.
    pub fn order_ingredient_ids(&self) -> CoreResult<Vec<String>> {
        self.validate_for_order()?;
        let bun_id = self
            .bun()
            .map(|bun| bun.ingredient.id.clone())
            .ok_or(CoreError::MissingBun)?;

        let mut ids = vec![bun_id; BUN_PORTIONS as usize];
        ids.extend(self.fillings().map(|item| item.ingredient.id.clone()));
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IngredientType;

    fn placed(id: &str, kind: IngredientType, price: u32, placement: &str) -> ConstructorIngredient {
        ConstructorIngredient::with_placement_id(
            Ingredient::new(id, format!("Ingredient {}", id), kind, price),
            placement,
        )
    }

    fn state_with(items: Vec<ConstructorIngredient>) -> BurgerState {
        let mut state = BurgerState::new();
        for item in items {
            state.reduce(BurgerAction::Add(item));
        }
        state
    }

    fn placement_ids(state: &BurgerState) -> Vec<&str> {
        state
            .ingredients()
            .unwrap_or_default()
            .iter()
            .map(|item| item.placement_id.as_str())
            .collect()
    }

    #[test]
    fn test_add_filling_assigns_placement_id() {
        let mut state = BurgerState::new();
        let meat = Ingredient::new("m1", "Meat", IngredientType::Main, 300);

        state.reduce(BurgerAction::add(meat.clone()));

        let items = state.ingredients().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].ingredient, meat);
        assert!(!items[0].placement_id.is_empty());
    }

    #[test]
    fn test_second_bun_replaces_first() {
        let mut state = BurgerState::new();
        state.reduce(BurgerAction::add(Ingredient::new("b1", "Bun 1", IngredientType::Bun, 50)));
        state.reduce(BurgerAction::add(Ingredient::new("b2", "Bun 2", IngredientType::Bun, 60)));

        let items = state.ingredients().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].ingredient.id, "b2");
        assert_eq!(items[0].ingredient.price, 60);
    }

    #[test]
    fn test_bun_swap_preserves_filling_order() {
        let mut state = state_with(vec![
            placed("b1", IngredientType::Bun, 50, "p-bun-1"),
            placed("m1", IngredientType::Main, 10, "p1"),
            placed("s1", IngredientType::Sauce, 5, "p2"),
            placed("m1", IngredientType::Main, 10, "p3"),
        ]);

        state.reduce(BurgerAction::Add(placed("b2", IngredientType::Bun, 60, "p-bun-2")));

        let buns: Vec<_> = state
            .ingredients()
            .unwrap()
            .iter()
            .filter(|item| item.is_bun())
            .collect();
        assert_eq!(buns.len(), 1);
        assert_eq!(buns[0].ingredient.id, "b2");

        let fillings: Vec<_> = state.fillings().map(|item| item.placement_id.as_str()).collect();
        assert_eq!(fillings, vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn test_at_most_one_bun_for_any_add_sequence() {
        let kinds = [
            IngredientType::Bun,
            IngredientType::Main,
            IngredientType::Bun,
            IngredientType::Sauce,
            IngredientType::Bun,
            IngredientType::Main,
        ];
        let mut state = BurgerState::new();
        for (i, kind) in kinds.iter().enumerate() {
            state.reduce(BurgerAction::add(Ingredient::new(format!("i{}", i), "x", *kind, 1)));
            let buns = state
                .ingredients()
                .unwrap()
                .iter()
                .filter(|item| item.is_bun())
                .count();
            assert!(buns <= 1);
        }
    }

    #[test]
    fn test_duplicate_fillings_are_allowed() {
        let meat = Ingredient::new("m1", "Meat", IngredientType::Main, 300);
        let mut state = BurgerState::new();
        state.reduce(BurgerAction::add(meat.clone()));
        state.reduce(BurgerAction::add(meat));

        assert_eq!(state.fillings().count(), 2);
    }

    #[test]
    fn test_remove_keeps_other_placements_of_same_ingredient() {
        let mut state = state_with(vec![
            placed("m1", IngredientType::Main, 10, "id1"),
            placed("m1", IngredientType::Main, 10, "id2"),
        ]);

        state.reduce(BurgerAction::remove("id1"));

        assert_eq!(placement_ids(&state), vec!["id2"]);
    }

    #[test]
    fn test_removing_everything_yields_sentinel() {
        let mut state = state_with(vec![
            placed("m1", IngredientType::Main, 10, "id1"),
            placed("s1", IngredientType::Sauce, 5, "id2"),
        ]);

        state.reduce(BurgerAction::remove("id1"));
        state.reduce(BurgerAction::remove("id2"));

        assert!(state.ingredients().is_none());
        assert!(state.is_empty());
        assert_eq!(state, BurgerState::new());
    }

    #[test]
    fn test_remove_on_sentinel_is_noop() {
        let mut state = BurgerState::new();
        state.reduce(BurgerAction::remove("missing"));
        assert!(state.is_empty());
    }

    #[test]
    fn test_move_swaps_neighbours() {
        let mut state = state_with(vec![
            placed("m1", IngredientType::Main, 10, "a"),
            placed("m2", IngredientType::Main, 10, "b"),
            placed("m3", IngredientType::Main, 10, "c"),
        ]);

        state.reduce(BurgerAction::move_item("b", MoveDirection::Up));
        assert_eq!(placement_ids(&state), vec!["b", "a", "c"]);

        state.reduce(BurgerAction::move_item("a", MoveDirection::Down));
        assert_eq!(placement_ids(&state), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_move_at_boundaries_is_noop() {
        let mut state = state_with(vec![
            placed("m1", IngredientType::Main, 10, "a"),
            placed("m2", IngredientType::Main, 10, "b"),
        ]);
        let before = state.clone();

        state.reduce(BurgerAction::move_item("a", MoveDirection::Up));
        assert_eq!(state, before);

        state.reduce(BurgerAction::move_item("b", MoveDirection::Down));
        assert_eq!(state, before);

        state.reduce(BurgerAction::move_item("missing", MoveDirection::Up));
        assert_eq!(state, before);
    }

    #[test]
    fn test_move_up_then_down_restores_order() {
        let mut state = state_with(vec![
            placed("m1", IngredientType::Main, 10, "a"),
            placed("m2", IngredientType::Main, 10, "b"),
            placed("m3", IngredientType::Main, 10, "c"),
        ]);
        let before = state.clone();

        state.reduce(BurgerAction::move_item("b", MoveDirection::Up));
        state.reduce(BurgerAction::move_item("b", MoveDirection::Down));

        assert_eq!(state, before);
    }

    #[test]
    fn test_clear_resets_to_sentinel() {
        let mut state = state_with(vec![placed("m1", IngredientType::Main, 10, "a")]);
        state.reduce(BurgerAction::Clear);
        assert!(state.ingredients().is_none());
    }

    #[test]
    fn test_total_price_counts_bun_twice() {
        let state = state_with(vec![
            placed("b1", IngredientType::Bun, 50, "bun"),
            placed("m1", IngredientType::Main, 300, "a"),
            placed("s1", IngredientType::Sauce, 15, "b"),
        ]);
        assert_eq!(state.total_price(), 50 * 2 + 300 + 15);
        assert_eq!(BurgerState::new().total_price(), 0);
    }

    #[test]
    fn test_order_ids_lead_with_bun_twice() {
        let state = state_with(vec![
            placed("m1", IngredientType::Main, 300, "a"),
            placed("b1", IngredientType::Bun, 50, "bun"),
            placed("s1", IngredientType::Sauce, 15, "b"),
        ]);
        assert_eq!(
            state.order_ingredient_ids().unwrap(),
            vec!["b1", "b1", "m1", "s1"]
        );
    }

    #[test]
    fn test_order_requires_bun_and_filling() {
        let only_filling = state_with(vec![placed("m1", IngredientType::Main, 300, "a")]);
        assert_eq!(only_filling.validate_for_order(), Err(CoreError::MissingBun));

        let only_bun = state_with(vec![placed("b1", IngredientType::Bun, 50, "bun")]);
        assert_eq!(only_bun.validate_for_order(), Err(CoreError::NoFillings));

        assert_eq!(BurgerState::new().order_ingredient_ids(), Err(CoreError::MissingBun));
    }
}
