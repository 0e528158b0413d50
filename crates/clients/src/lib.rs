//! Downstream service clients for the storefront gateway.
//!
//! One trait per downstream service (product, cart, order), each with two
//! implementations: an HTTP client used in production and an in-memory
//! double for tests. The HTTP clients share a single `reqwest::Client`
//! (carrying the per-call timeout) and attach per-service API keys through
//! the header composer.

pub mod cart;
pub mod endpoint;
pub mod error;
pub mod headers;
mod http;
pub mod order;
pub mod product;

pub use cart::{CartClient, HttpCartClient, InMemoryCartClient};
pub use endpoint::Endpoint;
pub use error::{ClientError, Service};
pub use headers::{API_KEY_HEADER, IDEMPOTENCY_KEY_HEADER, compose_headers};
pub use order::{HttpOrderClient, InMemoryOrderClient, OrderClient};
pub use product::{HttpProductClient, InMemoryProductClient, ProductClient};
