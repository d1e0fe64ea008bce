//! # Feed Command
//!
//! `burger feed`: the kitchen status board.

use burger_client::Store;
use burger_core::slices::FeedState;
use burger_core::OrderStatus;

use super::Output;
use crate::error::{CliError, CliResult, ErrorCode};

/// How many numbers each status column shows.
const BOARD_ROWS: usize = 10;

pub async fn feed(store: &Store, out: &Output) -> CliResult<()> {
    // A rejected fetch is already in `feed.error`.
    let _ = store.fetch_feed().await;

    let feed = store.select(|s| s.feed.clone());
    if let Some(error) = &feed.error {
        return Err(CliError::new(ErrorCode::ApiError, error.clone()));
    }

    out.emit(&feed.snapshot, |_| render(&feed))
}

fn render(feed: &FeedState) -> String {
    let join = |numbers: Vec<u32>| {
        numbers
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    };

    let mut lines = vec![
        format!("Ready:     {}", join(feed.numbers_with_status(OrderStatus::Done, BOARD_ROWS))),
        format!(
            "Cooking:   {}",
            join(feed.numbers_with_status(OrderStatus::Pending, BOARD_ROWS))
        ),
        format!("Completed all time: {}", feed.snapshot.total),
        format!("Completed today:    {}", feed.snapshot.total_today),
        String::new(),
    ];

    for order in feed.orders() {
        lines.push(format!("#{:<8} {:<8} {}", order.number, order.status, order.name));
    }
    lines.join("\n")
}
