//! Gateway abstraction
//!
//! One method per remote endpoint. Stores depend on this trait rather than
//! on the HTTP client so that the transport stays swappable and tests can
//! run against an in-process stub.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;
use crate::query::ProductQueryParams;
use crate::types::{
    AddToCartRequest, Cart, CreateOrderRequest, LoginRequest, Order, OrderFilter, OrderStats,
    OrderStatus, Product, ProductPage, RegisterRequest, UpdateCartItemRequest, User,
};

pub mod http;

pub use http::HttpGateway;

/// Remote catalog/cart/order gateway.
///
/// Every cart mutation returns the full cart snapshot; order creation
/// returns the created order with its server-computed total. The session
/// cookie is carried implicitly by the implementation.
#[async_trait]
pub trait Gateway: Send + Sync {
    // Catalog
    async fn fetch_products(&self, params: &ProductQueryParams) -> Result<ProductPage>;
    async fn fetch_product(&self, id: &str) -> Result<Product>;
    async fn fetch_sizes(&self) -> Result<Vec<String>>;
    async fn fetch_colors(&self) -> Result<Vec<String>>;

    // Cart
    async fn fetch_cart(&self) -> Result<Cart>;
    async fn add_to_cart(&self, req: &AddToCartRequest) -> Result<Cart>;
    async fn update_cart_item(&self, req: &UpdateCartItemRequest) -> Result<Cart>;
    async fn remove_cart_item(&self, item_id: &str) -> Result<Cart>;
    async fn clear_cart(&self) -> Result<Cart>;

    // Orders
    async fn create_order(&self, req: &CreateOrderRequest) -> Result<Order>;
    async fn fetch_user_orders(&self) -> Result<Vec<Order>>;
    async fn fetch_order(&self, id: &str) -> Result<Order>;
    async fn list_all_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>>;
    async fn update_order_status(&self, order_id: &str, status: OrderStatus) -> Result<Order>;
    async fn fetch_order_stats(&self) -> Result<OrderStats>;

    // Session
    async fn login(&self, req: &LoginRequest) -> Result<User>;
    async fn register(&self, req: &RegisterRequest) -> Result<User>;
    async fn logout(&self) -> Result<()>;
}

/// Error payload the gateway attaches to non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

/// `code` value marking a stock shortage on an otherwise-valid request.
pub const CODE_OUT_OF_STOCK: &str = "OUT_OF_STOCK";
