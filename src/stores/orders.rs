//! Order store
//!
//! Order history plus the order-creation lifecycle. Orders are append-only
//! from this side: created once, optionally status-updated by an admin,
//! never deleted.

use std::sync::Arc;

use crate::error::{ClientError, Result};
use crate::gateway::Gateway;
use crate::types::{
    CartItem, CreateOrderRequest, Order, OrderFilter, OrderItemRequest, OrderStats, OrderStatus,
};

/// State machine for the current order-creation attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CheckoutPhase {
    #[default]
    Idle,
    Pending,
    Fulfilled,
    Rejected,
}

pub struct OrderStore {
    gateway: Arc<dyn Gateway>,
    orders: Vec<Order>,
    current: Option<Order>,
    phase: CheckoutPhase,
    error: Option<String>,
    order_success: bool,
    is_loading: bool,
}

impl OrderStore {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            orders: vec![],
            current: None,
            phase: CheckoutPhase::Idle,
            error: None,
            order_success: false,
            is_loading: false,
        }
    }

    /// Most-recent-first order history.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }
    pub fn current_order(&self) -> Option<&Order> {
        self.current.as_ref()
    }
    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
    pub fn clear_error(&mut self) {
        self.error = None;
    }
    pub fn clear_current_order(&mut self) {
        self.current = None;
    }
    pub fn order_success(&self) -> bool {
        self.order_success
    }

    /// Consumes the success flag. Returns `true` exactly once per placed
    /// order; the checkout flow acts on it (cart clear, navigation) and a
    /// second consumption is a no-op, so it cannot re-trigger on re-render.
    pub fn take_order_success(&mut self) -> bool {
        std::mem::take(&mut self.order_success)
    }

    /// Places an order from the given cart lines. The payload carries no
    /// total; the gateway prices the order from current product data. On
    /// success the order is prepended to the history and the success flag
    /// is raised.
    pub async fn create_order(&mut self, items: &[CartItem]) -> Result<()> {
        if items.is_empty() {
            return Err(ClientError::Validation("cannot place an order with an empty cart".into()));
        }
        self.phase = CheckoutPhase::Pending;
        self.error = None;
        self.order_success = false;

        let req = CreateOrderRequest {
            products: items
                .iter()
                .map(|item| OrderItemRequest {
                    product_id: item.product.id.clone(),
                    quantity: item.quantity,
                    size: item.size.clone(),
                })
                .collect(),
        };
        match self.gateway.create_order(&req).await {
            Ok(order) => {
                tracing::info!(order_id = %order.id, total = order.total, "order placed");
                self.phase = CheckoutPhase::Fulfilled;
                self.current = Some(order.clone());
                self.orders.insert(0, order);
                self.order_success = true;
                Ok(())
            }
            Err(e) => {
                self.phase = CheckoutPhase::Rejected;
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Replaces the history with the current user's orders.
    pub async fn fetch_user_orders(&mut self) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        match self.gateway.fetch_user_orders().await {
            Ok(orders) => {
                self.is_loading = false;
                self.orders = orders;
                Ok(())
            }
            Err(e) => {
                self.is_loading = false;
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Loads a single order into the current-order slot, independent of
    /// the history list.
    pub async fn fetch_order_by_id(&mut self, id: &str) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        match self.gateway.fetch_order(id).await {
            Ok(order) => {
                self.is_loading = false;
                self.current = Some(order);
                Ok(())
            }
            Err(e) => {
                self.is_loading = false;
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Admin: replaces the list with all orders matching the filter.
    pub async fn list_all_orders(&mut self, filter: &OrderFilter) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        match self.gateway.list_all_orders(filter).await {
            Ok(orders) => {
                self.is_loading = false;
                self.orders = orders;
                Ok(())
            }
            Err(e) => {
                self.is_loading = false;
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Admin: sets an order's status. Deliberately permissive - any status
    /// may be set from any other, including backwards; there is no
    /// client-side transition table.
    pub async fn update_status(&mut self, order_id: &str, status: OrderStatus) -> Result<()> {
        self.error = None;
        match self.gateway.update_order_status(order_id, status).await {
            Ok(updated) => {
                if let Some(order) = self.orders.iter_mut().find(|o| o.id == updated.id) {
                    *order = updated.clone();
                }
                if self.current.as_ref().is_some_and(|o| o.id == updated.id) {
                    self.current = Some(updated);
                }
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Admin: read-only aggregate totals for the dashboard.
    pub async fn get_stats(&self) -> Result<OrderStats> {
        self.gateway.fetch_order_stats().await
    }
}
