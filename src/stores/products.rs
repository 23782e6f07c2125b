//! Product query store
//!
//! Filter/sort/pagination criteria plus the materialized result page.
//! Criteria edits are decoupled from fetching so the view can batch
//! several filter changes before applying; any criteria change invalidates
//! the previous result page rather than patching it.

use std::sync::Arc;

use crate::error::Result;
use crate::gateway::Gateway;
use crate::query::{FilterUpdate, ProductQuery};
use crate::types::{Pagination, Product};

pub struct ProductStore {
    gateway: Arc<dyn Gateway>,
    query: ProductQuery,
    products: Vec<Product>,
    pagination: Pagination,
    current: Option<Product>,
    sizes: Vec<String>,
    colors: Vec<String>,
    is_loading: bool,
    error: Option<String>,
}

impl ProductStore {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            query: ProductQuery::default(),
            products: vec![],
            pagination: Pagination::default(),
            current: None,
            sizes: vec![],
            colors: vec![],
            is_loading: false,
            error: None,
        }
    }

    pub fn query(&self) -> &ProductQuery {
        &self.query
    }
    pub fn products(&self) -> &[Product] {
        &self.products
    }
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }
    pub fn current_product(&self) -> Option<&Product> {
        self.current.as_ref()
    }
    pub fn sizes(&self) -> &[String] {
        &self.sizes
    }
    pub fn colors(&self) -> &[String] {
        &self.colors
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
    pub fn clear_current_product(&mut self) {
        self.current = None;
    }

    /// Merges a partial criteria change. Does not fetch; the stale result
    /// page is invalidated so it can never render against new criteria.
    pub fn set_filters(&mut self, update: FilterUpdate) {
        self.query.merge(update);
        self.invalidate_page();
    }

    /// Resets criteria to their defaults and invalidates the page.
    pub fn clear_filters(&mut self) {
        self.query = ProductQuery::default();
        self.invalidate_page();
    }

    /// Fetches page 1 for the current criteria. Always page 1: a filter
    /// change restarts pagination.
    pub async fn apply_filters(&mut self) -> Result<()> {
        self.fetch_page(1).await
    }

    /// Fetches another page for unchanged criteria.
    pub async fn go_to_page(&mut self, page: u32) -> Result<()> {
        self.fetch_page(page).await
    }

    async fn fetch_page(&mut self, page: u32) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        let params = self.query.to_params(page);
        match self.gateway.fetch_products(&params).await {
            Ok(result) => {
                self.is_loading = false;
                tracing::debug!(
                    page,
                    count = result.products.len(),
                    total = result.pagination.total_products,
                    "product page loaded"
                );
                self.products = result.products;
                self.pagination = result.pagination;
                Ok(())
            }
            Err(e) => {
                self.is_loading = false;
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Loads one product into the current-product slot (detail view).
    pub async fn fetch_product_by_id(&mut self, id: &str) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        match self.gateway.fetch_product(id).await {
            Ok(product) => {
                self.is_loading = false;
                self.current = Some(product);
                Ok(())
            }
            Err(e) => {
                self.is_loading = false;
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Loads the distinct facet values used to populate filter controls.
    /// Both lists are replaced together, so a colors failure cannot leave
    /// fresh sizes next to stale colors.
    pub async fn fetch_facets(&mut self) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        let sizes = match self.gateway.fetch_sizes().await {
            Ok(sizes) => sizes,
            Err(e) => {
                self.is_loading = false;
                self.error = Some(e.to_string());
                return Err(e);
            }
        };
        match self.gateway.fetch_colors().await {
            Ok(colors) => {
                self.is_loading = false;
                self.sizes = sizes;
                self.colors = colors;
                Ok(())
            }
            Err(e) => {
                self.is_loading = false;
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn invalidate_page(&mut self) {
        self.products.clear();
        self.pagination = Pagination::default();
    }
}
