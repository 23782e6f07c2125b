//! Wire types shared with the storefront gateway
//!
//! Monetary amounts are mirrored verbatim from the gateway's JSON numbers;
//! the client never performs money arithmetic, so totals here are display
//! data, not inputs to any computation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// =============================================================================
// Catalog
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    /// Inventory on hand as last reported. Used only as a pre-check
    /// optimization before `add to cart`; the gateway enforces stock.
    pub quantity: u32,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub attributes: ProductAttributes,
    #[serde(default)]
    pub image: String,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Whether a size token must accompany this product in a cart.
    pub fn requires_size(&self) -> bool {
        !self.attributes.sizes.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductAttributes {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
}

/// One page of catalog results plus its pagination metadata.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_products: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { current_page: 1, total_pages: 1, total_products: 0 }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// Full cart snapshot as returned by every cart mutation.
///
/// `total` is the gateway's authoritative figure and is never recomputed
/// from `items` on this side.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub total: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(rename = "itemId")]
    pub id: String,
    pub product: ProductRef,
    #[serde(default)]
    pub size: Option<String>,
    pub quantity: u32,
    /// Unit price at the time the item entered the cart.
    pub price: f64,
}

/// Denormalized product display fields carried on cart and order lines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub price: f64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    pub product_id: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItemRequest {
    pub item_id: String,
    pub quantity: u32,
}

// =============================================================================
// Orders
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub products: Vec<OrderLineItem>,
    /// Computed server-side from current product prices.
    pub total: f64,
    pub status: OrderStatus,
    pub customer: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub product_id: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
    pub quantity: u32,
    #[serde(default)]
    pub size: Option<String>,
    /// Unit price at time of order.
    pub price: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        };
        write!(f, "{s}")
    }
}

/// Payload for `POST /orders`. Deliberately carries no total: pricing is
/// always resolved by the gateway from current product data.
#[derive(Clone, Debug, Serialize)]
pub struct CreateOrderRequest {
    pub products: Vec<OrderItemRequest>,
}

#[derive(Clone, Debug, Serialize)]
pub struct OrderItemRequest {
    pub product_id: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// Admin order-list filter. Empty filter lists everything.
#[derive(Clone, Debug, Default, Serialize)]
pub struct OrderFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total_orders: u64,
    pub total_revenue: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

// =============================================================================
// Session
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Clone, Debug, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 30, message = "username must be 3-30 characters"))]
    pub username: String,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}
