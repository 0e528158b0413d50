//! Request orchestration for the storefront gateway.
//!
//! Composes downstream calls into atomic-looking client-facing operations.
//! Cart mutations are serialized read-modify-write cycles with a merge-by-id
//! policy (the cart service itself is a dumb store), and checkout is the
//! read-cart → create-order → clear-cart sequence with failure
//! short-circuiting at each step.

pub mod cart;
pub mod checkout;
pub mod error;

pub use cart::CartCoordinator;
pub use checkout::CheckoutCoordinator;
pub use error::OrchestrationError;
