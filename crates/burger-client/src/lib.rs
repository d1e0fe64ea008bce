//! # burger-client: I/O Layer for Stellar Burgers
//!
//! Connects the pure state layer in `burger-core` to the burger REST API
//! and to the stored session.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         burger-client                                   │
//! │                                                                         │
//! │   ┌───────────────────────────────────────────────────────────────┐    │
//! │   │  Store                                                        │    │
//! │   │  Mutex<RootState> + one async method per flow                 │    │
//! │   └──────────────┬──────────────────────────────┬─────────────────┘    │
//! │                  │ Arc<dyn BurgerApi>           │ Arc<dyn CredentialStore>
//! │   ┌──────────────▼──────────────┐   ┌───────────▼─────────────────┐    │
//! │   │  HttpApi (reqwest)          │──►│  FileCredentialStore        │    │
//! │   │  bearer auth, token refresh │   │  MemoryCredentialStore      │    │
//! │   └──────────────┬──────────────┘   └─────────────────────────────┘    │
//! │                  │ HTTPS                                                │
//! └──────────────────┼──────────────────────────────────────────────────────┘
//!                    ▼
//!        norma.nomoreparties.space/api
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use burger_client::{ClientConfig, Store};
//!
//! # async fn run() -> burger_client::ClientResult<()> {
//! let store = Store::connect(ClientConfig::load(None)?)?;
//! store.fetch_ingredients().await?;
//! store.check_user_auth().await?;
//! println!("{} ingredients", store.select(|s| s.ingredients.products.len()));
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod store;

pub use api::BurgerApi;
pub use config::ClientConfig;
pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore, StoredCredentials};
pub use error::{ClientError, ClientResult};
pub use http::HttpApi;
pub use store::Store;
