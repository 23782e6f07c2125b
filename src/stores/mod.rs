//! State stores
//!
//! Each store exclusively owns one entity slice and mediates its mutations
//! through the gateway. Operations take `&mut self`, so two mutations on
//! the same store can never be in flight at once, and a dropped operation
//! future leaves state untouched.

pub mod cart;
pub mod orders;
pub mod products;

pub use cart::{CartStore, QuantityEdit, MAX_QUANTITY, MIN_QUANTITY};
pub use orders::{CheckoutPhase, OrderStore};
pub use products::ProductStore;
