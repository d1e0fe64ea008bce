//! # Store
//!
//! Owns the [`RootState`] and runs every async flow against it.
//!
//! ## Flow Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        One async flow                                   │
//! │                                                                         │
//! │  store.login(req)                                                       │
//! │       │                                                                 │
//! │       ├──► dispatch Login(Pending)          (state lock held briefly)  │
//! │       │                                                                 │
//! │       ├──► validate, call API, persist      (no lock held)             │
//! │       │                                                                 │
//! │       ├─ ok ──► dispatch Login(Fulfilled(user))                        │
//! │       └─ err ─► dispatch Login(Rejected(err.to_string()))              │
//! │                                                                         │
//! │  The result is also returned to the caller.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Flows are independent: two concurrent flows interleave their phases
//! and the last one to settle wins. Only the phases of a single flow are
//! ordered.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use burger_core::slices::{
    BurgerAction, FeedAction, IngredientsAction, MoveDirection, OrderAction, UserAction,
};
use burger_core::validation::{
    validate_email, validate_login, validate_password_reset, validate_profile_update,
    validate_registration,
};
use burger_core::{
    AppAction, AsyncPhase, ConstructorIngredient, CoreError, CreateOrderResponse, FeedResponse,
    Ingredient, LoginRequest, Order, OrderLookupResponse, ProfileUpdate, Reducer, RegisterRequest,
    ResetPasswordRequest, RootState, User,
};
use tracing::{debug, info, warn};

use crate::api::{AuthResponse, BurgerApi};
use crate::config::ClientConfig;
use crate::credentials::{CredentialStore, FileCredentialStore, StoredCredentials};
use crate::error::{ClientError, ClientResult};
use crate::http::HttpApi;

pub struct Store {
    state: Mutex<RootState>,
    api: Arc<dyn BurgerApi>,
    credentials: Arc<dyn CredentialStore>,
    access_token_max_age: chrono::Duration,
}

impl Store {
    pub fn new(
        api: Arc<dyn BurgerApi>,
        credentials: Arc<dyn CredentialStore>,
        config: &ClientConfig,
    ) -> Self {
        Store {
            state: Mutex::new(RootState::default()),
            api,
            credentials,
            access_token_max_age: config.access_token_max_age(),
        }
    }

    /// Store backed by the real API and the on-disk session.
    pub fn connect(config: ClientConfig) -> ClientResult<Self> {
        let path = config
            .resolved_credentials_path()
            .ok_or_else(|| ClientError::InvalidConfig("No credentials path available".into()))?;
        info!(api = %config.base_url, session = ?path, "Connecting store");

        let credentials: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::new(path));
        let api = Arc::new(HttpApi::new(config.clone(), credentials.clone())?);
        Ok(Store::new(api, credentials, &config))
    }

    // =========================================================================
    // Dispatch & Select
    // =========================================================================

    pub fn dispatch(&self, action: impl Into<AppAction>) {
        let action = action.into();
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.reduce(action);
    }

    /// Reads from the current state without cloning it.
    pub fn select<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&RootState) -> R,
    {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Snapshot of the whole tree.
    pub fn state(&self) -> RootState {
        self.select(RootState::clone)
    }

    /// Dispatches `Pending`, awaits `flow`, then dispatches the outcome.
    async fn run<T, A, W, Fut>(&self, name: &'static str, wrap: W, flow: Fut) -> ClientResult<T>
    where
        T: Clone,
        A: Into<AppAction>,
        W: Fn(AsyncPhase<T>) -> A,
        Fut: Future<Output = ClientResult<T>>,
    {
        debug!(flow = name, "Flow started");
        self.dispatch(wrap(AsyncPhase::Pending));

        let result = flow.await;
        match &result {
            Ok(_) => debug!(flow = name, "Flow fulfilled"),
            Err(err) => warn!(flow = name, error = %err, "Flow rejected"),
        }
        self.dispatch(wrap(AsyncPhase::settle(result.as_ref().map(T::clone))));
        result
    }

    // =========================================================================
    // Catalog & Feed
    // =========================================================================

    pub async fn fetch_ingredients(&self) -> ClientResult<Vec<Ingredient>> {
        self.run(
            "fetch_ingredients",
            IngredientsAction::FetchIngredients,
            self.api.get_ingredients(),
        )
        .await
    }

    pub async fn fetch_feed(&self) -> ClientResult<FeedResponse> {
        self.run("fetch_feed", FeedAction::FetchFeed, self.api.get_feed())
            .await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    pub async fn fetch_user_orders(&self) -> ClientResult<Vec<Order>> {
        self.run(
            "fetch_user_orders",
            OrderAction::FetchUserOrders,
            self.api.get_user_orders(),
        )
        .await
    }

    /// Submits an order, then replaces the returned stub with the full
    /// order fetched by its number.
    pub async fn create_order(&self, ingredient_ids: Vec<String>) -> ClientResult<CreateOrderResponse> {
        let api = &self.api;
        self.run("create_order", OrderAction::CreateOrder, async move {
            let response = api.create_order(&ingredient_ids).await?;
            if !response.success {
                return Ok(response);
            }
            let detail = api.get_order_by_number(response.order.number).await?;
            match detail.first() {
                Some(order) => {
                    let order = order.clone();
                    Ok(response.with_detail(order))
                }
                None => Ok(response),
            }
        })
        .await
    }

    pub async fn fetch_order_by_number(&self, number: u32) -> ClientResult<OrderLookupResponse> {
        self.run(
            "fetch_order_by_number",
            OrderAction::FetchOrderByNumber,
            self.api.get_order_by_number(number),
        )
        .await
    }

    /// Checkout: orders the burger in the constructor.
    ///
    /// Requires a signed-in user, a bun with at least one filling, and no
    /// other checkout in progress. On success the order goes to the
    /// "order accepted" dialog and the constructor is emptied.
    pub async fn submit_order(&self) -> ClientResult<CreateOrderResponse> {
        let (signed_in, in_flight, ids) = self.select(|state| {
            (
                state.user.is_authenticated(),
                state.orders.order_request,
                state.burger.order_ingredient_ids(),
            )
        });

        if !signed_in {
            return Err(ClientError::NotAuthenticated);
        }
        let ids = ids?;
        if in_flight {
            return Err(ClientError::OrderInFlight);
        }

        self.dispatch(OrderAction::SetOrderRequest(true));
        let result = self.create_order(ids).await;

        if let Ok(response) = &result {
            if response.success {
                info!(number = response.order.number, "Order accepted");
                self.dispatch(OrderAction::SetOrderModalData(Some(response.order.clone())));
                self.dispatch(BurgerAction::Clear);
            }
        }
        self.dispatch(OrderAction::SetOrderRequest(false));

        result
    }

    /// Dismisses the "order accepted" dialog.
    pub fn close_order_modal(&self) {
        self.dispatch(OrderAction::SetOrderModalData(None));
    }

    // =========================================================================
    // Constructor
    // =========================================================================

    /// Places an ingredient and returns its placement id.
    pub fn add_ingredient(&self, ingredient: Ingredient) -> String {
        let item = ConstructorIngredient::new(ingredient);
        let placement_id = item.placement_id.clone();
        self.dispatch(BurgerAction::Add(item));
        placement_id
    }

    /// Places a catalog ingredient by its catalog id.
    pub fn add_ingredient_by_id(&self, id: &str) -> ClientResult<String> {
        let ingredient = self
            .select(|state| state.ingredients.find(id).cloned())
            .ok_or_else(|| CoreError::IngredientNotFound(id.to_string()))?;
        Ok(self.add_ingredient(ingredient))
    }

    pub fn remove_ingredient(&self, placement_id: &str) {
        self.dispatch(BurgerAction::remove(placement_id));
    }

    pub fn move_ingredient(&self, placement_id: &str, direction: MoveDirection) {
        self.dispatch(BurgerAction::move_item(placement_id, direction));
    }

    pub fn clear_constructor(&self) {
        self.dispatch(BurgerAction::Clear);
    }

    // =========================================================================
    // User
    // =========================================================================

    pub async fn fetch_user(&self) -> ClientResult<User> {
        self.run("fetch_user", UserAction::FetchUser, self.api.get_user())
            .await
    }

    /// Resolves who is signed in at startup.
    ///
    /// Without a stored session the API is not called and the result is
    /// `None`. A session the server rejects is wiped.
    pub async fn check_user_auth(&self) -> ClientResult<Option<User>> {
        let api = &self.api;
        let credentials = &self.credentials;
        self.run("check_user_auth", UserAction::CheckUserAuth, async move {
            if !credentials.has_session() {
                debug!("No stored session");
                return Ok(None);
            }
            match api.get_user().await {
                Ok(user) => Ok(Some(user)),
                Err(err) => {
                    if let Err(clear_err) = credentials.clear() {
                        warn!(error = %clear_err, "Failed to clear rejected session");
                    }
                    Err(err)
                }
            }
        })
        .await
    }

    pub async fn login(&self, request: LoginRequest) -> ClientResult<User> {
        self.run("login", UserAction::Login, async {
            validate_login(&request)?;
            let auth = self.api.login(&request).await?;
            self.persist_session(auth)
        })
        .await
    }

    pub async fn register(&self, request: RegisterRequest) -> ClientResult<User> {
        self.run("register", UserAction::Register, async {
            validate_registration(&request)?;
            let auth = self.api.register(&request).await?;
            self.persist_session(auth)
        })
        .await
    }

    /// Saves both tokens in one write and hands back the user.
    fn persist_session(&self, auth: AuthResponse) -> ClientResult<User> {
        let session = StoredCredentials::issue(
            &auth.access_token,
            &auth.refresh_token,
            self.access_token_max_age,
        );
        self.credentials.save(&session)?;
        info!(email = %auth.user.email, "Signed in");
        Ok(auth.user)
    }

    /// Sends only the fields in `update`. See [`ProfileUpdate::diff`].
    pub async fn update_profile(&self, update: ProfileUpdate) -> ClientResult<User> {
        self.run("update_profile", UserAction::UpdateProfile, async {
            validate_profile_update(&update)?;
            self.api.update_user(&update).await
        })
        .await
    }

    /// Ends the session. Stored credentials are cleared whatever the server
    /// answers.
    pub async fn logout(&self) -> ClientResult<()> {
        self.run("logout", UserAction::Logout, async {
            let result = match self.credentials.refresh_token() {
                Some(token) => self.api.logout(&token).await,
                None => Ok(()),
            };
            let cleared = self.credentials.clear();
            result?;
            cleared
        })
        .await
    }

    pub async fn forgot_password(&self, email: &str) -> ClientResult<()> {
        self.run("forgot_password", UserAction::ForgotPassword, async {
            validate_email(email)?;
            self.api.forgot_password(email.trim()).await
        })
        .await
    }

    pub async fn reset_password(&self, request: ResetPasswordRequest) -> ClientResult<()> {
        self.run("reset_password", UserAction::ResetPassword, async {
            validate_password_reset(&request)?;
            self.api.reset_password(&request).await
        })
        .await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
