//! Cart store
//!
//! Holds the authoritative-as-known cart. Every mutation is one round trip
//! to the gateway followed by a wholesale replace with the returned
//! snapshot; the store never forks state the gateway did not confirm, and
//! `total` is never recomputed from item prices on this side.

use std::sync::Arc;

use crate::error::{ClientError, Result};
use crate::gateway::Gateway;
use crate::types::{AddToCartRequest, Cart, CartItem, Product, UpdateCartItemRequest};

pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 10;

/// Lifecycle tag of the most recent quantity edit, so the view can tell a
/// pending optimistic value from a settled one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuantityEdit {
    Optimistic { item_id: String, prior: u32, requested: u32 },
    Confirmed { item_id: String, quantity: u32 },
    RolledBack { item_id: String, reverted_to: u32 },
}

pub struct CartStore {
    gateway: Arc<dyn Gateway>,
    items: Vec<CartItem>,
    total: f64,
    is_loading: bool,
    error: Option<String>,
    edit: Option<QuantityEdit>,
}

impl CartStore {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway, items: vec![], total: 0.0, is_loading: false, error: None, edit: None }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }
    /// Gateway-authoritative total, mirrored verbatim.
    pub fn total(&self) -> f64 {
        self.total
    }
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
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
    pub fn last_edit(&self) -> Option<&QuantityEdit> {
        self.edit.as_ref()
    }

    /// Derived view data, never persisted back as authoritative state.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Loads the current user's cart. A gateway "cart not found" means the
    /// user simply has no cart yet and yields the empty cart, not an error.
    pub async fn fetch(&mut self) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        match self.gateway.fetch_cart().await {
            Ok(cart) => {
                self.is_loading = false;
                self.replace(cart);
                Ok(())
            }
            Err(ClientError::NotFound(_)) => {
                self.is_loading = false;
                self.replace(Cart::default());
                Ok(())
            }
            Err(e) => {
                self.is_loading = false;
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Adds a (product, size) selection. Duplicate merging is the gateway's
    /// job; the returned snapshot is taken as-is. The stock comparison
    /// against `product.quantity` is a pre-check optimization only - the
    /// gateway remains the source of truth on inventory.
    pub async fn add_item(&mut self, product: &Product, quantity: u32, size: Option<String>) -> Result<()> {
        if quantity < MIN_QUANTITY {
            return Err(ClientError::Validation(format!("quantity must be at least {MIN_QUANTITY}")));
        }
        if product.requires_size() && size.is_none() {
            return Err(ClientError::Validation(format!("a size is required for {}", product.name)));
        }
        if quantity > product.quantity {
            return Err(ClientError::Stock(format!("only {} of {} in stock", product.quantity, product.name)));
        }
        self.is_loading = true;
        self.error = None;
        let req = AddToCartRequest { product_id: product.id.clone(), quantity, size };
        match self.gateway.add_to_cart(&req).await {
            Ok(cart) => {
                self.is_loading = false;
                tracing::debug!(product_id = %req.product_id, quantity, "item added to cart");
                self.replace(cart);
                Ok(())
            }
            Err(e) => {
                self.is_loading = false;
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Optimistic quantity edit: the new value is shown immediately and
    /// reverted to the prior one if the gateway rejects the call. Values
    /// outside the `1..=10` range never reach the gateway.
    pub async fn update_item_quantity(&mut self, item_id: &str, quantity: u32) -> Result<()> {
        if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&quantity) {
            return Err(ClientError::Validation(format!(
                "quantity must be between {MIN_QUANTITY} and {MAX_QUANTITY}"
            )));
        }
        let prior = self
            .items
            .iter()
            .find(|i| i.id == item_id)
            .map(|i| i.quantity)
            .ok_or_else(|| ClientError::NotFound(format!("cart item {item_id} is not in the cart")))?;

        self.set_quantity(item_id, quantity);
        self.edit = Some(QuantityEdit::Optimistic {
            item_id: item_id.to_string(),
            prior,
            requested: quantity,
        });
        self.error = None;

        let req = UpdateCartItemRequest { item_id: item_id.to_string(), quantity };
        match self.gateway.update_cart_item(&req).await {
            Ok(cart) => {
                self.replace(cart);
                self.edit = Some(QuantityEdit::Confirmed { item_id: item_id.to_string(), quantity });
                Ok(())
            }
            Err(e) => {
                self.set_quantity(item_id, prior);
                self.edit = Some(QuantityEdit::RolledBack {
                    item_id: item_id.to_string(),
                    reverted_to: prior,
                });
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Removes an item. A gateway "not found" propagates, but callers may
    /// treat it as soft: the end state (item absent) is what was asked for.
    pub async fn remove_item(&mut self, item_id: &str) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        match self.gateway.remove_cart_item(item_id).await {
            Ok(cart) => {
                self.is_loading = false;
                tracing::debug!(item_id, "item removed from cart");
                self.replace(cart);
                Ok(())
            }
            Err(e) => {
                self.is_loading = false;
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Empties the cart remotely and locally.
    pub async fn clear(&mut self) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        match self.gateway.clear_cart().await {
            Ok(cart) => {
                self.is_loading = false;
                self.replace(cart);
                Ok(())
            }
            Err(e) => {
                self.is_loading = false;
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Local-only reset, used when the session ends: the cart is
    /// per-session state and must never show stale across users.
    pub fn reset(&mut self) {
        self.items.clear();
        self.total = 0.0;
        self.error = None;
        self.edit = None;
    }

    fn replace(&mut self, cart: Cart) {
        self.items = cart.items;
        self.total = cart.total;
    }

    fn set_quantity(&mut self, item_id: &str, quantity: u32) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == item_id) {
            item.quantity = quantity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::StubGateway;
    use crate::types::tests::sample_product;
    use crate::types::ProductRef;

    fn setup() -> (Arc<StubGateway>, CartStore) {
        let gateway = Arc::new(StubGateway::default());
        let store = CartStore::new(gateway.clone());
        (gateway, store)
    }

    fn seeded_cart() -> Cart {
        Cart {
            items: vec![CartItem {
                id: "i1".into(),
                product: ProductRef { id: "p1".into(), name: "Runner".into(), image: String::new(), price: 50.0 },
                size: Some("9".into()),
                quantity: 2,
                price: 50.0,
            }],
            total: 100.0,
        }
    }

    #[tokio::test]
    async fn test_missing_cart_becomes_empty_cart() {
        let (gateway, mut store) = setup();
        gateway.cart_missing.store(true, std::sync::atomic::Ordering::SeqCst);
        store.fetch().await.unwrap();
        assert!(store.items().is_empty());
        assert_eq!(store.total(), 0.0);
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn test_total_mirrors_gateway_not_item_prices() {
        let (gateway, mut store) = setup();
        let mut cart = seeded_cart();
        // Inconsistent on purpose: a discount the client knows nothing about.
        cart.total = 87.5;
        *gateway.cart.lock().unwrap() = cart;
        store.fetch().await.unwrap();
        assert_eq!(store.total(), 87.5);
        assert_eq!(store.item_count(), 2);
    }

    #[tokio::test]
    async fn test_add_item_state_equals_gateway_snapshot() {
        let (gateway, mut store) = setup();
        assert!(store.is_empty());
        store.add_item(&sample_product(), 2, Some("9".into())).await.unwrap();
        let snapshot = gateway.cart_snapshot();
        assert_eq!(store.items(), snapshot.items.as_slice());
        assert_eq!(store.total(), snapshot.total);
        assert_eq!(store.total(), 100.0);
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_add_item_missing_size_rejected_before_gateway() {
        let (gateway, mut store) = setup();
        let err = store.add_item(&sample_product(), 1, None).await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(gateway.call_count("add_to_cart"), 0);
    }

    #[tokio::test]
    async fn test_add_item_stock_precheck() {
        let (gateway, mut store) = setup();
        let mut product = sample_product();
        product.quantity = 1;
        let err = store.add_item(&product, 2, Some("9".into())).await.unwrap_err();
        assert!(matches!(err, ClientError::Stock(_)));
        assert_eq!(gateway.call_count("add_to_cart"), 0);
    }

    #[tokio::test]
    async fn test_quantity_range_rejected_before_gateway() {
        let (gateway, mut store) = setup();
        *gateway.cart.lock().unwrap() = seeded_cart();
        store.fetch().await.unwrap();

        for bad in [0, 11, 99] {
            let err = store.update_item_quantity("i1", bad).await.unwrap_err();
            assert!(matches!(err, ClientError::Validation(_)));
        }
        assert_eq!(gateway.call_count("update_cart_item"), 0);
    }

    #[tokio::test]
    async fn test_quantity_update_confirmed() {
        let (gateway, mut store) = setup();
        *gateway.cart.lock().unwrap() = seeded_cart();
        store.fetch().await.unwrap();

        store.update_item_quantity("i1", 5).await.unwrap();
        assert_eq!(store.items()[0].quantity, 5);
        assert_eq!(store.total(), 250.0);
        assert_eq!(
            store.last_edit(),
            Some(&QuantityEdit::Confirmed { item_id: "i1".into(), quantity: 5 })
        );
    }

    #[tokio::test]
    async fn test_quantity_update_rolls_back_on_failure() {
        let (gateway, mut store) = setup();
        *gateway.cart.lock().unwrap() = seeded_cart();
        store.fetch().await.unwrap();

        gateway.fail_next_with(ClientError::Remote("connection reset".into()));
        let err = store.update_item_quantity("i1", 7).await.unwrap_err();
        assert!(matches!(err, ClientError::Remote(_)));
        assert_eq!(store.items()[0].quantity, 2);
        assert_eq!(
            store.last_edit(),
            Some(&QuantityEdit::RolledBack { item_id: "i1".into(), reverted_to: 2 })
        );
        assert!(store.error().is_some());
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let (gateway, mut store) = setup();
        *gateway.cart.lock().unwrap() = seeded_cart();
        store.fetch().await.unwrap();

        store.remove_item("i1").await.unwrap();
        assert!(store.is_empty());
        assert_eq!(store.total(), 0.0);

        store.add_item(&sample_product(), 1, Some("8".into())).await.unwrap();
        store.clear().await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_remove_and_clear_settle_loading_state() {
        let (gateway, mut store) = setup();
        *gateway.cart.lock().unwrap() = seeded_cart();
        store.fetch().await.unwrap();

        gateway.fail_next_with(ClientError::Remote("boom".into()));
        assert!(store.remove_item("i1").await.is_err());
        assert!(!store.is_loading());
        assert!(store.error().is_some());
        assert_eq!(store.items().len(), 1);

        store.remove_item("i1").await.unwrap();
        assert!(!store.is_loading());
        assert!(store.error().is_none());

        gateway.fail_next_with(ClientError::Remote("boom".into()));
        assert!(store.clear().await.is_err());
        assert!(!store.is_loading());
        assert!(store.error().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_add_merges_via_gateway() {
        let (gateway, mut store) = setup();
        let product = sample_product();
        store.add_item(&product, 2, Some("9".into())).await.unwrap();
        store.add_item(&product, 3, Some("9".into())).await.unwrap();
        // One line, merged quantity, snapshot taken as-is.
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].quantity, 5);
        assert_eq!(store.items(), gateway.cart_snapshot().items.as_slice());
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_prior_state() {
        let (gateway, mut store) = setup();
        *gateway.cart.lock().unwrap() = seeded_cart();
        store.fetch().await.unwrap();

        gateway.fail_next_with(ClientError::Remote("boom".into()));
        assert!(store.fetch().await.is_err());
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.total(), 100.0);
        assert!(store.error().is_some());
    }
}
