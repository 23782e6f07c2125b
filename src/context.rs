//! Application context
//!
//! Owns the session and the three stores, constructed once at startup from
//! a gateway handle. Protected operations dispatch through here: the
//! session gate runs first, then the store operation, so permission checks
//! are centralized instead of scattered across the view layer. The context
//! also carries the two cross-store flows: logout resets the cart, and
//! consuming an order success clears it.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::gateway::{Gateway, HttpGateway};
use crate::query::FilterUpdate;
use crate::session::SessionStore;
use crate::stores::{CartStore, OrderStore, ProductStore};
use crate::types::{LoginRequest, OrderFilter, OrderStats, OrderStatus, Product, RegisterRequest};

pub struct AppContext {
    session: SessionStore,
    cart: CartStore,
    orders: OrderStore,
    products: ProductStore,
}

impl AppContext {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            session: SessionStore::new(gateway.clone()),
            cart: CartStore::new(gateway.clone()),
            orders: OrderStore::new(gateway.clone()),
            products: ProductStore::new(gateway),
        }
    }

    /// Convenience constructor wiring up the HTTP gateway.
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpGateway::new(config)?)))
    }

    // Read access for rendering.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }
    pub fn cart(&self) -> &CartStore {
        &self.cart
    }
    pub fn orders(&self) -> &OrderStore {
        &self.orders
    }
    pub fn products(&self) -> &ProductStore {
        &self.products
    }

    /// Dismisses surfaced errors on every store.
    pub fn clear_errors(&mut self) {
        self.session.clear_error();
        self.cart.clear_error();
        self.orders.clear_error();
        self.products.clear_error();
    }

    // -------------------------------------------------------------------------
    // Catalog (no gate)
    // -------------------------------------------------------------------------

    pub fn set_product_filters(&mut self, update: FilterUpdate) {
        self.products.set_filters(update);
    }

    pub fn clear_product_filters(&mut self) {
        self.products.clear_filters();
    }

    pub async fn apply_product_filters(&mut self) -> Result<()> {
        self.products.apply_filters().await
    }

    pub async fn go_to_product_page(&mut self, page: u32) -> Result<()> {
        self.products.go_to_page(page).await
    }

    pub async fn load_product(&mut self, id: &str) -> Result<()> {
        self.products.fetch_product_by_id(id).await
    }

    pub async fn load_facets(&mut self) -> Result<()> {
        self.products.fetch_facets().await
    }

    pub fn clear_current_product(&mut self) {
        self.products.clear_current_product();
    }

    // -------------------------------------------------------------------------
    // Session
    // -------------------------------------------------------------------------

    pub async fn login(&mut self, req: LoginRequest) -> Result<()> {
        self.session.login(req).await
    }

    pub async fn register(&mut self, req: RegisterRequest) -> Result<()> {
        self.session.register(req).await
    }

    /// Ends the session and resets the cart: cart state is per-session and
    /// must never survive into the next user's view.
    pub async fn logout(&mut self) {
        self.session.logout().await;
        self.cart.reset();
    }

    // -------------------------------------------------------------------------
    // Cart (authenticated)
    // -------------------------------------------------------------------------

    pub async fn fetch_cart(&mut self) -> Result<()> {
        self.session.require_authenticated()?;
        self.cart.fetch().await
    }

    pub async fn add_to_cart(&mut self, product: &Product, quantity: u32, size: Option<String>) -> Result<()> {
        self.session.require_authenticated()?;
        self.cart.add_item(product, quantity, size).await
    }

    pub async fn update_cart_quantity(&mut self, item_id: &str, quantity: u32) -> Result<()> {
        self.session.require_authenticated()?;
        self.cart.update_item_quantity(item_id, quantity).await
    }

    pub async fn remove_cart_item(&mut self, item_id: &str) -> Result<()> {
        self.session.require_authenticated()?;
        self.cart.remove_item(item_id).await
    }

    pub async fn clear_cart(&mut self) -> Result<()> {
        self.session.require_authenticated()?;
        self.cart.clear().await
    }

    // -------------------------------------------------------------------------
    // Orders (authenticated)
    // -------------------------------------------------------------------------

    /// Places an order from the current cart lines.
    pub async fn place_order(&mut self) -> Result<()> {
        self.session.require_authenticated()?;
        let items = self.cart.items().to_vec();
        self.orders.create_order(&items).await
    }

    /// Consumes the order success flag. On the first call after a placed
    /// order this clears the cart and returns `true`; every later call is a
    /// no-op returning `false`, so the checkout effect cannot re-trigger.
    pub async fn consume_order_success(&mut self) -> bool {
        if !self.orders.take_order_success() {
            return false;
        }
        if let Err(e) = self.cart.clear().await {
            // The order went through; a failed remote clear must not leave
            // stale items on screen.
            tracing::warn!(%e, "cart clear after order failed, resetting locally");
        }
        self.cart.reset();
        true
    }

    pub async fn fetch_my_orders(&mut self) -> Result<()> {
        self.session.require_authenticated()?;
        self.orders.fetch_user_orders().await
    }

    pub async fn load_order(&mut self, id: &str) -> Result<()> {
        self.session.require_authenticated()?;
        self.orders.fetch_order_by_id(id).await
    }

    pub fn clear_current_order(&mut self) {
        self.orders.clear_current_order();
    }

    // -------------------------------------------------------------------------
    // Admin
    // -------------------------------------------------------------------------

    pub async fn admin_list_orders(&mut self, filter: &OrderFilter) -> Result<()> {
        self.session.require_admin()?;
        self.orders.list_all_orders(filter).await
    }

    pub async fn admin_update_order_status(&mut self, order_id: &str, status: OrderStatus) -> Result<()> {
        self.session.require_admin()?;
        self.orders.update_status(order_id, status).await
    }

    pub async fn admin_order_stats(&self) -> Result<OrderStats> {
        self.session.require_admin()?;
        self.orders.get_stats().await
    }
}
