//! Cart service client: trait, HTTP implementation, in-memory double.
//!
//! The cart service is a dumb store: it has no merge semantics of its own,
//! so the gateway always rewrites the cart in whole. Merge-by-id policy
//! lives in the orchestration layer, not here.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::CartItem;
use reqwest::header::HeaderMap;

use crate::endpoint::Endpoint;
use crate::error::{ClientError, Service};
use crate::headers::compose_headers;
use crate::http::{send, send_json};

/// Access to the session cart held by the cart service.
#[async_trait]
pub trait CartClient: Send + Sync {
    /// Reads the full cart.
    async fn fetch(&self) -> Result<Vec<CartItem>, ClientError>;

    /// Rewrites the full cart in one call.
    async fn replace(&self, items: &[CartItem]) -> Result<(), ClientError>;

    /// Empties the cart.
    async fn clear(&self) -> Result<(), ClientError>;
}

/// HTTP client for the cart service.
#[derive(Debug, Clone)]
pub struct HttpCartClient {
    http: reqwest::Client,
    endpoint: Endpoint,
}

impl HttpCartClient {
    pub fn new(http: reqwest::Client, endpoint: Endpoint) -> Self {
        Self { http, endpoint }
    }

    fn headers(&self) -> HeaderMap {
        compose_headers(self.endpoint.api_key(), &HeaderMap::new())
    }
}

#[async_trait]
impl CartClient for HttpCartClient {
    async fn fetch(&self) -> Result<Vec<CartItem>, ClientError> {
        let request = self
            .http
            .get(self.endpoint.url("/cart"))
            .headers(self.headers());
        send_json(Service::Cart, request).await
    }

    async fn replace(&self, items: &[CartItem]) -> Result<(), ClientError> {
        let request = self
            .http
            .put(self.endpoint.url("/cart"))
            .headers(self.headers())
            .json(items);
        send(Service::Cart, request).await.map(|_| ())
    }

    async fn clear(&self) -> Result<(), ClientError> {
        let request = self
            .http
            .delete(self.endpoint.url("/cart"))
            .headers(self.headers());
        send(Service::Cart, request).await.map(|_| ())
    }
}

#[derive(Debug, Default)]
struct InMemoryCartState {
    items: Vec<CartItem>,
    fail_on_fetch: bool,
    fail_on_replace: bool,
    fail_on_clear: bool,
    fetch_calls: u32,
    replace_calls: u32,
    clear_calls: u32,
}

/// In-memory cart store for testing. Behaves as a faithful echo store:
/// a fetch returns exactly what the last replace wrote.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCartClient {
    state: Arc<RwLock<InMemoryCartState>>,
}

impl InMemoryCartClient {
    /// Creates an empty in-memory cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cart seeded with the given line items.
    pub fn with_items(items: Vec<CartItem>) -> Self {
        let client = Self::default();
        client.state.write().unwrap().items = items;
        client
    }

    /// Current stored items, bypassing the client interface.
    pub fn items(&self) -> Vec<CartItem> {
        self.state.read().unwrap().items.clone()
    }

    pub fn set_fail_on_fetch(&self, fail: bool) {
        self.state.write().unwrap().fail_on_fetch = fail;
    }

    pub fn set_fail_on_replace(&self, fail: bool) {
        self.state.write().unwrap().fail_on_replace = fail;
    }

    pub fn set_fail_on_clear(&self, fail: bool) {
        self.state.write().unwrap().fail_on_clear = fail;
    }

    /// Number of fetch calls made, including failed ones.
    pub fn fetch_calls(&self) -> u32 {
        self.state.read().unwrap().fetch_calls
    }

    /// Number of replace calls made, including failed ones.
    pub fn replace_calls(&self) -> u32 {
        self.state.read().unwrap().replace_calls
    }

    /// Number of clear calls made, including failed ones.
    pub fn clear_calls(&self) -> u32 {
        self.state.read().unwrap().clear_calls
    }
}

fn unavailable() -> ClientError {
    ClientError::Status {
        service: Service::Cart,
        status: 500,
    }
}

#[async_trait]
impl CartClient for InMemoryCartClient {
    async fn fetch(&self) -> Result<Vec<CartItem>, ClientError> {
        let mut state = self.state.write().unwrap();
        state.fetch_calls += 1;
        if state.fail_on_fetch {
            return Err(unavailable());
        }
        Ok(state.items.clone())
    }

    async fn replace(&self, items: &[CartItem]) -> Result<(), ClientError> {
        let mut state = self.state.write().unwrap();
        state.replace_calls += 1;
        if state.fail_on_replace {
            return Err(unavailable());
        }
        state.items = items.to_vec();
        Ok(())
    }

    async fn clear(&self) -> Result<(), ClientError> {
        let mut state = self.state.write().unwrap();
        state.clear_calls += 1;
        if state.fail_on_clear {
            return Err(unavailable());
        }
        state.items.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, quantity: u32) -> CartItem {
        CartItem {
            id,
            name: format!("Item {id}"),
            price: 10.0,
            quantity,
        }
    }

    #[tokio::test]
    async fn test_replace_then_fetch_echoes() {
        let client = InMemoryCartClient::new();
        let items = vec![item(1, 2), item(2, 1)];

        client.replace(&items).await.unwrap();
        assert_eq!(client.fetch().await.unwrap(), items);
        assert_eq!(client.replace_calls(), 1);
        assert_eq!(client.fetch_calls(), 1);
    }

    #[tokio::test]
    async fn test_clear_empties_the_store() {
        let client = InMemoryCartClient::with_items(vec![item(1, 1)]);
        client.clear().await.unwrap();
        assert!(client.items().is_empty());
        assert_eq!(client.clear_calls(), 1);
    }

    #[tokio::test]
    async fn test_fail_switches_count_attempts() {
        let client = InMemoryCartClient::with_items(vec![item(1, 1)]);
        client.set_fail_on_clear(true);

        assert!(client.clear().await.is_err());
        assert_eq!(client.clear_calls(), 1);
        // Store is untouched on failure.
        assert_eq!(client.items().len(), 1);
    }
}
