//! # Catalog Command
//!
//! `burger ingredients [--kind bun|main|sauce]`

use burger_client::Store;
use burger_core::{Ingredient, IngredientType};

use super::Output;
use crate::error::{CliError, CliResult};

const CATEGORIES: [IngredientType; 3] = [IngredientType::Bun, IngredientType::Main, IngredientType::Sauce];

pub async fn ingredients(store: &Store, out: &Output, kind: Option<String>) -> CliResult<()> {
    let kind = kind
        .map(|k| k.parse::<IngredientType>())
        .transpose()
        .map_err(|e| CliError::validation(e.to_string()))?;

    store.fetch_ingredients().await?;

    let products: Vec<Ingredient> = store.select(|s| match kind {
        Some(kind) => s.ingredients.by_type(kind).cloned().collect(),
        None => s.ingredients.products.clone(),
    });

    out.emit(&products, |products| render(products, kind))
}

fn render(products: &[Ingredient], kind: Option<IngredientType>) -> String {
    let categories: Vec<IngredientType> = match kind {
        Some(kind) => vec![kind],
        None => CATEGORIES.to_vec(),
    };

    let mut lines = Vec::new();
    for category in categories {
        lines.push(format!("{}:", category));
        for item in products.iter().filter(|p| p.kind == category) {
            lines.push(format!("  {:<26} {:>6}  {}", item.id, item.price, item.name));
        }
    }
    lines.join("\n")
}
