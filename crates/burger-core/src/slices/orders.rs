//! # Orders Slice
//!
//! Order submission state, the signed-in user's order history and the
//! order currently on display.
//!
//! ## Flows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Flow                  Flag           Fulfilled effect                  │
//! │  ────                  ────           ────────────────                  │
//! │  FetchUserOrders       is_loading     history replaced wholesale        │
//! │  CreateOrder           order_request  success → current + prepend       │
//! │  FetchOrderByNumber    is_loading     found → current + in-place update │
//! │                                                                         │
//! │  Pending clears `error`. Rejected stores the message (or a fallback).   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `order_request` guards against double submission only as far as
//! callers check it: the slice itself accepts overlapping flows.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::slice::{message_or, AsyncPhase, Reducer};
use crate::types::{CreateOrderResponse, Order, OrderLookupResponse};

const USER_ORDERS_ERROR: &str = "Failed to load order history";
const CREATE_ORDER_ERROR: &str = "Failed to create order";
const ORDER_LOOKUP_ERROR: &str = "Order not found";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderAction {
    FetchUserOrders(AsyncPhase<Vec<Order>>),
    CreateOrder(AsyncPhase<CreateOrderResponse>),
    FetchOrderByNumber(AsyncPhase<OrderLookupResponse>),
    ClearCurrentOrder,
    ClearUserOrders,
    SetOrderRequest(bool),
    SetOrderModalData(Option<Order>),
    ClearError,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrdersState {
    /// Newest first.
    pub user_orders: Vec<Order>,
    pub current_order: Option<Order>,
    /// A read flow is in flight.
    pub is_loading: bool,
    pub error: Option<String>,
    /// An order submission is in flight.
    pub order_request: bool,
    /// Order shown in the "order accepted" dialog.
    pub order_modal_data: Option<Order>,
}

impl Reducer for OrdersState {
    type Action = OrderAction;

    fn reduce(&mut self, action: OrderAction) {
        match action {
            OrderAction::FetchUserOrders(phase) => match phase {
                AsyncPhase::Pending => self.start_read(),
                AsyncPhase::Fulfilled(orders) => {
                    self.is_loading = false;
                    self.user_orders = orders;
                }
                AsyncPhase::Rejected(message) => {
                    self.is_loading = false;
                    self.error = Some(message_or(message, USER_ORDERS_ERROR));
                }
            },

            OrderAction::CreateOrder(phase) => match phase {
                AsyncPhase::Pending => {
                    self.order_request = true;
                    self.error = None;
                }
                AsyncPhase::Fulfilled(response) => {
                    self.order_request = false;
                    if response.success {
                        self.current_order = Some(response.order.clone());
                        self.user_orders.insert(0, response.order);
                    }
                }
                AsyncPhase::Rejected(message) => {
                    self.order_request = false;
                    self.error = Some(message_or(message, CREATE_ORDER_ERROR));
                }
            },

            OrderAction::FetchOrderByNumber(phase) => match phase {
                AsyncPhase::Pending => self.start_read(),
                AsyncPhase::Fulfilled(response) => {
                    self.is_loading = false;
                    if let Some(found) = response.first() {
                        for order in self.user_orders.iter_mut() {
                            if order.number == found.number {
                                *order = found.clone();
                            }
                        }
                        self.current_order = Some(found.clone());
                    }
                }
                AsyncPhase::Rejected(message) => {
                    self.is_loading = false;
                    self.error = Some(message_or(message, ORDER_LOOKUP_ERROR));
                }
            },

            OrderAction::ClearCurrentOrder => self.current_order = None,
            OrderAction::ClearUserOrders => self.user_orders.clear(),
            OrderAction::SetOrderRequest(flag) => self.order_request = flag,
            OrderAction::SetOrderModalData(order) => self.order_modal_data = order,
            OrderAction::ClearError => self.error = None,
        }
    }
}

impl OrdersState {
    fn start_read(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    /// History entry with this number.
    pub fn find_user_order(&self, number: u32) -> Option<&Order> {
        self.user_orders.iter().find(|order| order.number == number)
    }
}
