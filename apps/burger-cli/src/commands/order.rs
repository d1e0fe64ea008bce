//! # Order Commands
//!
//! ```text
//! burger order show <N>                       any order, with its price
//! burger order history                        your orders (signed in)
//! burger order create --bun ID --filling ID…  checkout (signed in)
//! ```

use burger_client::Store;
use burger_core::slices::OrderComposition;
use burger_core::Order;
use clap::Subcommand;
use serde::Serialize;
use tracing::info;

use super::{require_user, Output};
use crate::error::{CliError, CliResult, ErrorCode};

#[derive(Subcommand, Debug)]
pub enum OrderCommand {
    /// Show one order by its number
    Show {
        number: u32,
    },

    /// List your past orders
    History,

    /// Build a burger and order it
    Create {
        /// Catalog id of the bun
        #[arg(long)]
        bun: String,

        /// Catalog id of a filling (repeatable, in stacking order)
        #[arg(long, required = true)]
        filling: Vec<String>,
    },
}

pub async fn run(store: &Store, out: &Output, command: OrderCommand) -> CliResult<()> {
    match command {
        OrderCommand::Show { number } => show(store, out, number).await,
        OrderCommand::History => history(store, out).await,
        OrderCommand::Create { bun, filling } => create(store, out, bun, filling).await,
    }
}

#[derive(Debug, Serialize)]
struct OrderDetails {
    order: Order,
    composition: OrderComposition,
}

async fn show(store: &Store, out: &Output, number: u32) -> CliResult<()> {
    store.fetch_ingredients().await?;
    store.fetch_order_by_number(number).await?;

    let details = store
        .select(|s| {
            s.orders
                .current_order
                .clone()
                .filter(|order| order.number == number)
                .map(|order| OrderDetails {
                    composition: s.ingredients.order_composition(&order),
                    order,
                })
        })
        .ok_or_else(|| CliError::not_found("Order", number))?;

    out.emit(&details, render_details)
}

async fn history(store: &Store, out: &Output) -> CliResult<()> {
    require_user(store).await?;
    store.fetch_user_orders().await?;

    let orders = store.select(|s| s.orders.user_orders.clone());
    out.emit(&orders, |orders| {
        if orders.is_empty() {
            return "No orders yet".to_string();
        }
        orders
            .iter()
            .map(|o| format!("#{:<8} {:<8} {}", o.number, o.status, o.name))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

async fn create(store: &Store, out: &Output, bun: String, fillings: Vec<String>) -> CliResult<()> {
    require_user(store).await?;
    store.fetch_ingredients().await?;

    store.clear_constructor();
    store.add_ingredient_by_id(&bun)?;
    for id in &fillings {
        store.add_ingredient_by_id(id)?;
    }
    let price = store.select(|s| s.burger.total_price());
    info!(bun = %bun, fillings = fillings.len(), price, "Submitting order");

    let response = store.submit_order().await?;
    if !response.success {
        return Err(CliError::new(ErrorCode::ApiError, "The kitchen did not accept the order"));
    }

    let accepted = store
        .select(|s| s.orders.order_modal_data.clone())
        .unwrap_or(response.order);
    store.close_order_modal();

    out.emit(&accepted, |order| {
        format!(
            "Order #{} accepted: {} ({} credits)\nStatus: {}",
            order.number, response.name, price, order.status
        )
    })
}

fn render_details(details: &OrderDetails) -> String {
    let order = &details.order;
    let mut lines = vec![
        format!("#{} {}", order.number, order.name),
        format!("Status: {}", order.status),
    ];
    if let Some(created) = order.created_at {
        lines.push(format!("Placed: {}", created.format("%Y-%m-%d %H:%M")));
    }
    lines.push("Ingredients:".to_string());
    for (ingredient, count) in &details.composition.items {
        lines.push(format!(
            "  {} x {:<3} {}",
            count, ingredient.price, ingredient.name
        ));
    }
    if !details.composition.unknown.is_empty() {
        lines.push(format!(
            "  (unknown: {})",
            details.composition.unknown.join(", ")
        ));
    }
    lines.push(format!("Total: {}", details.composition.total));
    lines.join("\n")
}
