//! Orchestration error types.

use clients::ClientError;
use thiserror::Error;

/// Errors that can occur while orchestrating cart and checkout operations.
#[derive(Debug, Error)]
pub enum OrchestrationError {
    /// Checkout was attempted against an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// A line item quantity below 1 was supplied.
    #[error("quantity for item {id} must be at least 1")]
    InvalidQuantity { id: i64 },

    /// A quantity update targeted an id not present in the cart.
    #[error("cart item {id} not found")]
    ItemNotFound { id: i64 },

    /// A downstream call failed.
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Convenience type alias for orchestration results.
pub type Result<T> = std::result::Result<T, OrchestrationError>;
