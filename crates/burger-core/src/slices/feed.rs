//! # Feed Slice
//!
//! Sole owner of the public order feed. A delivered response with
//! `success: false` is ignored: the previous snapshot stays on screen.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::slice::{message_or, AsyncPhase, Reducer};
use crate::types::{FeedResponse, FeedSnapshot, Order, OrderStatus};

const FEED_LOAD_ERROR: &str = "Failed to load order feed";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedAction {
    FetchFeed(AsyncPhase<FeedResponse>),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FeedState {
    pub snapshot: FeedSnapshot,
    pub loading: bool,
    pub error: Option<String>,
}

impl Reducer for FeedState {
    type Action = FeedAction;

    fn reduce(&mut self, action: FeedAction) {
        match action {
            FeedAction::FetchFeed(AsyncPhase::Pending) => {
                self.loading = true;
                self.error = None;
            }
            FeedAction::FetchFeed(AsyncPhase::Fulfilled(response)) => {
                self.loading = false;
                if response.success {
                    self.snapshot = response.into_snapshot();
                }
            }
            FeedAction::FetchFeed(AsyncPhase::Rejected(message)) => {
                self.loading = false;
                self.error = Some(message_or(message, FEED_LOAD_ERROR));
            }
        }
    }
}

impl FeedState {
    pub fn orders(&self) -> &[Order] {
        &self.snapshot.orders
    }

    pub fn find_order(&self, number: u32) -> Option<&Order> {
        self.snapshot.orders.iter().find(|order| order.number == number)
    }

    /// Order numbers with the given status, capped for the status board.
    pub fn numbers_with_status(&self, status: OrderStatus, limit: usize) -> Vec<u32> {
        self.snapshot
            .orders
            .iter()
            .filter(|order| order.status == status)
            .map(|order| order.number)
            .take(limit)
            .collect()
    }
}
