//! # Domain Types
//!
//! Core domain types used throughout Stellar Burgers.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────┐   ┌─────────────────┐  │
//! │  │   Ingredient    │   │ ConstructorIngredient│   │     Order       │  │
//! │  │  ─────────────  │   │  ──────────────────  │   │  ─────────────  │  │
//! │  │  _id (catalog)  │◄──│  ingredient (copy)   │   │  _id            │  │
//! │  │  type           │   │  id (placement)      │   │  number         │  │
//! │  │  price          │   └──────────────────────┘   │  status         │  │
//! │  │  nutrition      │                              │  ingredients[]  │  │
//! │  └─────────────────┘                              └─────────────────┘  │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────┐                        │
//! │  │      User       │   │    FeedSnapshot      │                        │
//! │  │  email, name    │   │  orders, total,      │                        │
//! │  └─────────────────┘   │  totalToday          │                        │
//! │                        └──────────────────────┘                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual Identity for Constructor Items
//! A catalog `Ingredient` is identified by its `_id`. The same ingredient
//! may appear several times in one burger, so each placement also carries
//! a locally generated `id`. Catalog data is copied, never borrowed: the
//! ingredients slice stays the owner of the catalog.
//!
//! Field names follow the burger API's JSON (`_id`, `image_large`,
//! `createdAt`, `totalToday`) so the same structs decode responses and
//! feed the reducers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Ingredient
// =============================================================================

/// Catalog category of an ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum IngredientType {
    Bun,
    Main,
    Sauce,
}

impl std::fmt::Display for IngredientType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngredientType::Bun => write!(f, "bun"),
            IngredientType::Main => write!(f, "main"),
            IngredientType::Sauce => write!(f, "sauce"),
        }
    }
}

impl std::str::FromStr for IngredientType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bun" | "buns" => Ok(IngredientType::Bun),
            "main" | "mains" | "filling" => Ok(IngredientType::Main),
            "sauce" | "sauces" => Ok(IngredientType::Sauce),
            other => Err(format!(
                "Unknown ingredient type: '{}'. Valid options: bun, main, sauce",
                other
            )),
        }
    }
}

/// A purchasable item from the catalog.
///
/// Immutable once fetched; owned by the ingredients slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Ingredient {
    /// Catalog identifier.
    #[serde(rename = "_id")]
    pub id: String,

    pub name: String,

    #[serde(rename = "type")]
    pub kind: IngredientType,

    pub proteins: u32,
    pub fat: u32,
    pub carbohydrates: u32,
    pub calories: u32,

    /// Price in whole currency units, as the API reports it.
    pub price: u32,

    pub image: String,
    pub image_large: String,
    pub image_mobile: String,
}

impl Ingredient {
    /// Builds an ingredient with zeroed nutrition and no images.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: IngredientType, price: u32) -> Self {
        Ingredient {
            id: id.into(),
            name: name.into(),
            kind,
            proteins: 0,
            fat: 0,
            carbohydrates: 0,
            calories: 0,
            price,
            image: String::new(),
            image_large: String::new(),
            image_mobile: String::new(),
        }
    }

    #[inline]
    pub fn is_bun(&self) -> bool {
        self.kind == IngredientType::Bun
    }
}

// =============================================================================
// Constructor Ingredient
// =============================================================================

/// An ingredient placed in the burger being assembled.
///
/// `placement_id` tells apart two placements of the same catalog item, so
/// removing or moving one of them never touches the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConstructorIngredient {
    #[serde(flatten)]
    pub ingredient: Ingredient,

    /// Locally generated placement id (UUID v4).
    #[serde(rename = "id")]
    pub placement_id: String,
}

impl ConstructorIngredient {
    /// Places an ingredient under a fresh placement id.
    pub fn new(ingredient: Ingredient) -> Self {
        Self::with_placement_id(ingredient, uuid::Uuid::new_v4().to_string())
    }

    /// Places an ingredient under a known placement id.
    pub fn with_placement_id(ingredient: Ingredient, placement_id: impl Into<String>) -> Self {
        ConstructorIngredient {
            ingredient,
            placement_id: placement_id.into(),
        }
    }

    #[inline]
    pub fn is_bun(&self) -> bool {
        self.ingredient.is_bun()
    }
}

// =============================================================================
// Order
// =============================================================================

/// Kitchen status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Accepted, not yet cooking.
    #[default]
    Created,
    /// Being cooked.
    Pending,
    /// Ready.
    Done,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Created => write!(f, "Created"),
            OrderStatus::Pending => write!(f, "Cooking"),
            OrderStatus::Done => write!(f, "Done"),
        }
    }
}

/// A submitted order.
///
/// Every field except `number` defaults, because order creation answers
/// with little more than the number; the full record arrives from the
/// follow-up lookup by number.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", default)]
    pub id: String,

    #[serde(default)]
    pub status: OrderStatus,

    #[serde(default)]
    pub name: String,

    /// Catalog ids, bun included twice.
    #[serde(default)]
    pub ingredients: Vec<String>,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,

    pub number: u32,
}

// =============================================================================
// User
// =============================================================================

/// The authenticated customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub email: String,
    pub name: String,
}

// =============================================================================
// Feed
// =============================================================================

/// Public order feed with aggregate counters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FeedSnapshot {
    pub orders: Vec<Order>,
    pub total: u32,
    pub total_today: u32,
}

// =============================================================================
// Response Payloads
// =============================================================================
// These responses keep their `success` flag: the reducers decide what an
// unsuccessful-but-delivered response means.

/// Body of the public feed endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub success: bool,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub total_today: u32,
}

impl FeedResponse {
    /// The snapshot this response carries.
    pub fn into_snapshot(self) -> FeedSnapshot {
        FeedSnapshot {
            orders: self.orders,
            total: self.total,
            total_today: self.total_today,
        }
    }
}

/// Body of the order creation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreateOrderResponse {
    pub success: bool,
    /// Generated burger name.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub order: Order,
}

impl CreateOrderResponse {
    /// Replaces the bare order with its full record from a lookup.
    pub fn with_detail(self, detail: Order) -> Self {
        CreateOrderResponse {
            order: detail,
            ..self
        }
    }
}

/// Body of the order-by-number endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderLookupResponse {
    pub success: bool,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl OrderLookupResponse {
    /// The looked-up order, if the lookup succeeded and found one.
    pub fn first(&self) -> Option<&Order> {
        if self.success {
            self.orders.first()
        } else {
            None
        }
    }
}

// =============================================================================
// Request Bodies
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResetPasswordRequest {
    pub password: String,
    /// Code from the reset email.
    pub token: String,
}

/// Profile changes; only the fields that differ are sent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ProfileUpdate {
    /// Compares form values with the current user and keeps the changes.
    ///
    /// An empty password means "keep the current password".
    pub fn diff(current: &User, name: &str, email: &str, password: &str) -> Self {
        ProfileUpdate {
            name: (name != current.name).then(|| name.to_string()),
            email: (email != current.email).then(|| email.to_string()),
            password: (!password.is_empty()).then(|| password.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingredient_decodes_api_shape() {
        let json = r#"{
            "_id": "643d69a5c3f7b9001cfa093c",
            "name": "Craterian bun R2-D3",
            "type": "bun",
            "proteins": 80,
            "fat": 24,
            "carbohydrates": 53,
            "calories": 420,
            "price": 1255,
            "image": "https://code.s3.yandex.net/react/code/bun-02.png",
            "image_mobile": "https://code.s3.yandex.net/react/code/bun-02-mobile.png",
            "image_large": "https://code.s3.yandex.net/react/code/bun-02-large.png",
            "__v": 0
        }"#;

        let ingredient: Ingredient = serde_json::from_str(json).unwrap();
        assert_eq!(ingredient.id, "643d69a5c3f7b9001cfa093c");
        assert_eq!(ingredient.kind, IngredientType::Bun);
        assert_eq!(ingredient.price, 1255);
        assert!(ingredient.is_bun());
    }

    #[test]
    fn test_constructor_ingredient_flattens_catalog_fields() {
        let placed = ConstructorIngredient::with_placement_id(
            Ingredient::new("m1", "Meat", IngredientType::Main, 300),
            "p-1",
        );
        let value = serde_json::to_value(&placed).unwrap();
        assert_eq!(value["_id"], "m1");
        assert_eq!(value["id"], "p-1");
        assert_eq!(value["type"], "main");
    }

    #[test]
    fn test_fresh_placement_ids_differ() {
        let meat = Ingredient::new("m1", "Meat", IngredientType::Main, 300);
        let a = ConstructorIngredient::new(meat.clone());
        let b = ConstructorIngredient::new(meat);
        assert_ne!(a.placement_id, b.placement_id);
    }

    #[test]
    fn test_partial_order_from_create_response() {
        let json = r#"{"success": true, "name": "Space burger", "order": {"number": 12345}}"#;
        let response: CreateOrderResponse = serde_json::from_str(json).unwrap();
        assert!(response.success);
        assert_eq!(response.order.number, 12345);
        assert_eq!(response.order.status, OrderStatus::Created);
        assert!(response.order.created_at.is_none());
    }

    #[test]
    fn test_full_order_decodes_timestamps() {
        let json = r#"{
            "_id": "abc123",
            "status": "done",
            "name": "Test Order",
            "createdAt": "2023-10-01T12:00:00Z",
            "updatedAt": "2023-10-01T12:30:00Z",
            "number": 5,
            "ingredients": ["ingredient1", "ingredient2"]
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Done);
        assert_eq!(order.ingredients.len(), 2);
        assert!(order.created_at.is_some());
    }

    #[test]
    fn test_create_response_with_detail_keeps_name() {
        let response = CreateOrderResponse {
            success: true,
            name: "Space burger".to_string(),
            order: Order {
                number: 7,
                ..Order::default()
            },
        };
        let detail = Order {
            id: "o7".to_string(),
            number: 7,
            status: OrderStatus::Pending,
            ..Order::default()
        };

        let merged = response.with_detail(detail.clone());
        assert_eq!(merged.name, "Space burger");
        assert_eq!(merged.order, detail);
    }

    #[test]
    fn test_lookup_first_requires_success() {
        let order = Order {
            number: 1,
            ..Order::default()
        };
        let failed = OrderLookupResponse {
            success: false,
            orders: vec![order.clone()],
        };
        assert!(failed.first().is_none());

        let found = OrderLookupResponse {
            success: true,
            orders: vec![order],
        };
        assert_eq!(found.first().map(|o| o.number), Some(1));
    }

    #[test]
    fn test_profile_update_diff_keeps_only_changes() {
        let user = User {
            email: "test@example.com".to_string(),
            name: "Test User".to_string(),
        };

        let update = ProfileUpdate::diff(&user, "Updated Name", "test@example.com", "");
        assert_eq!(update.name.as_deref(), Some("Updated Name"));
        assert!(update.email.is_none());
        assert!(update.password.is_none());

        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"name":"Updated Name"}"#);

        assert!(ProfileUpdate::diff(&user, "Test User", "test@example.com", "").is_empty());
    }

    #[test]
    fn test_ingredient_type_parsing() {
        assert_eq!("bun".parse::<IngredientType>().unwrap(), IngredientType::Bun);
        assert_eq!("Sauce".parse::<IngredientType>().unwrap(), IngredientType::Sauce);
        assert!("dessert".parse::<IngredientType>().is_err());
    }
}
