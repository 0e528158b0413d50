//! Shared wire types for the storefront gateway.
//!
//! These are transport-level DTOs owned by the downstream services; the
//! gateway only reads, transforms, and relays them.

pub mod types;

pub use types::{CartItem, Order, OrderStatus, Product};
