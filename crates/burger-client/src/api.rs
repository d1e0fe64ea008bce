//! # Burger API Seam
//!
//! One method per endpoint of the Stellar Burgers REST API. [`HttpApi`]
//! talks to the real server; tests substitute their own implementation.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │  Method                 HTTP                         Auth   success:false │
//! │  ──────                 ────                         ────   ───────────── │
//! │  get_ingredients        GET   /ingredients           -      error         │
//! │  get_feed               GET   /orders/all            -      passed on     │
//! │  get_user_orders        GET   /orders                yes    error         │
//! │  create_order           POST  /orders                yes    passed on     │
//! │  get_order_by_number    GET   /orders/{n}            -      passed on     │
//! │  login                  POST  /auth/login            -      error         │
//! │  register               POST  /auth/register         -      error         │
//! │  logout                 POST  /auth/logout           -      error         │
//! │  refresh_token          POST  /auth/token            -      error         │
//! │  get_user               GET   /auth/user             yes    error         │
//! │  update_user            PATCH /auth/user             yes    error         │
//! │  forgot_password        POST  /password-reset        -      error         │
//! │  reset_password         POST  /password-reset/reset  -      error         │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```
//! "passed on" responses keep their `success` flag so the reducers can
//! decide what an unsuccessful payload means.
//!
//! [`HttpApi`]: crate::http::HttpApi

use async_trait::async_trait;
use burger_core::{
    CreateOrderResponse, FeedResponse, Ingredient, LoginRequest, Order, OrderLookupResponse,
    ProfileUpdate, RegisterRequest, ResetPasswordRequest, User,
};
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

#[async_trait]
pub trait BurgerApi: Send + Sync {
    async fn get_ingredients(&self) -> ClientResult<Vec<Ingredient>>;

    async fn get_feed(&self) -> ClientResult<FeedResponse>;

    /// Order history of the signed-in user.
    async fn get_user_orders(&self) -> ClientResult<Vec<Order>>;

    /// Submits ingredient ids, bun first and twice.
    async fn create_order(&self, ingredient_ids: &[String]) -> ClientResult<CreateOrderResponse>;

    async fn get_order_by_number(&self, number: u32) -> ClientResult<OrderLookupResponse>;

    async fn login(&self, request: &LoginRequest) -> ClientResult<AuthResponse>;

    async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse>;

    /// Invalidates the refresh token on the server.
    async fn logout(&self, refresh_token: &str) -> ClientResult<()>;

    async fn refresh_token(&self, refresh_token: &str) -> ClientResult<TokenResponse>;

    async fn get_user(&self) -> ClientResult<User>;

    async fn update_user(&self, update: &ProfileUpdate) -> ClientResult<User>;

    /// Asks the server to email a reset code.
    async fn forgot_password(&self, email: &str) -> ClientResult<()>;

    async fn reset_password(&self, request: &ResetPasswordRequest) -> ClientResult<()>;
}

// =============================================================================
// Wire Types
// =============================================================================

/// Every response carries `success`. Implemented by the payloads that
/// turn `success: false` into an error.
pub trait Envelope {
    fn success(&self) -> bool;

    fn message(&self) -> Option<&str> {
        None
    }

    /// `Err(ClientError::Api)` when the server reported failure.
    fn checked(self) -> ClientResult<Self>
    where
        Self: Sized,
    {
        if self.success() {
            Ok(self)
        } else {
            let message = self
                .message()
                .filter(|m| !m.is_empty())
                .unwrap_or("Request was not successful")
                .to_string();
            Err(ClientError::Api(message))
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    pub user: User,
    /// Includes the `Bearer ` scheme.
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub success: bool,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IngredientsResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<Ingredient>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOrdersResponse {
    pub success: bool,
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// Body of acknowledgements and of most error responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// `{ "token": ... }` body of logout and token refresh.
#[derive(Debug, Clone, Serialize)]
pub struct TokenRequest<'a> {
    pub token: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderRequest<'a> {
    pub ingredients: &'a [String],
}

macro_rules! envelope {
    ($($ty:ty),*) => {
        $(impl Envelope for $ty {
            fn success(&self) -> bool {
                self.success
            }
        })*
    };
}

envelope!(AuthResponse, TokenResponse, IngredientsResponse, UserResponse, UserOrdersResponse);

impl Envelope for MessageResponse {
    fn success(&self) -> bool {
        self.success
    }

    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
