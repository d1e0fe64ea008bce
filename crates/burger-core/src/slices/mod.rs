//! # State Slices
//!
//! ```text
//! slices/
//! ├── mod.rs          ◄─── You are here (exports)
//! ├── ingredients.rs  ◄─── Catalog + load status
//! ├── burger.rs       ◄─── Burger being assembled (constructor)
//! ├── orders.rs       ◄─── Submission, history, current order
//! ├── feed.rs         ◄─── Public order feed (single owner)
//! └── user.rs         ◄─── Session + credential flows
//! ```
//!
//! Slices never read each other. Anything that needs two slices (checkout
//! needs the user and the burger) is composed by the caller.

pub mod burger;
pub mod feed;
pub mod ingredients;
pub mod orders;
pub mod user;

pub use burger::{BurgerAction, BurgerState, MoveDirection};
pub use feed::{FeedAction, FeedState};
pub use ingredients::{IngredientsAction, IngredientsState, LoadStatus, OrderComposition};
pub use orders::{OrderAction, OrdersState};
pub use user::{RouteAccess, UserAction, UserState};
