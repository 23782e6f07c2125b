//! Storefront Client
//!
//! Client-side state management for an e-commerce storefront backed by a
//! remote HTTP/JSON gateway.
//!
//! ## Features
//! - Cart synchronized against the gateway (full-snapshot replace, merge
//!   and pricing delegated to the server)
//! - Order placement lifecycle with a one-shot success flag
//! - Product catalog queries with filters, facets, and pagination
//! - Cookie-based session with role-gated admin operations
//!
//! The view layer constructs one [`AppContext`] at startup and dispatches
//! every intent through it; stores expose read access for rendering.

pub mod config;
pub mod context;
pub mod error;
pub mod gateway;
pub mod query;
pub mod session;
pub mod stores;
pub mod types;

pub use config::ClientConfig;
pub use context::AppContext;
pub use error::{ClientError, Result};
pub use gateway::{Gateway, HttpGateway};
pub use query::{FilterUpdate, ProductQuery, SortOrder};
pub use session::SessionStore;
pub use stores::{CartStore, CheckoutPhase, OrderStore, ProductStore, QuantityEdit};
pub use types::{
    Cart, CartItem, Order, OrderFilter, OrderStats, OrderStatus, Pagination, Product, ProductPage,
    ProductRef, Role, User,
};
