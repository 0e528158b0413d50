//! Order service client: trait, HTTP implementation, in-memory double.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use common::{CartItem, Order, OrderStatus};
use reqwest::header::HeaderMap;
use serde::Serialize;

use crate::endpoint::Endpoint;
use crate::error::{ClientError, Service};
use crate::headers::{IDEMPOTENCY_KEY_HEADER, compose_headers};
use crate::http::send_json;

/// Access to the order service.
#[async_trait]
pub trait OrderClient: Send + Sync {
    /// Creates an order from the given line items. The idempotency key lets
    /// the order service deduplicate a retried checkout.
    async fn create(
        &self,
        items: &[CartItem],
        idempotency_key: &str,
    ) -> Result<Order, ClientError>;

    /// Fetches all orders.
    async fn list(&self) -> Result<Vec<Order>, ClientError>;

    /// Fetches a single order by id.
    async fn get(&self, id: &str) -> Result<Order, ClientError>;

    /// Updates an order's status and returns the updated order.
    async fn update_status(&self, id: &str, status: OrderStatus) -> Result<Order, ClientError>;
}

#[derive(Serialize)]
struct StatusPatch {
    status: OrderStatus,
}

/// HTTP client for the order service.
#[derive(Debug, Clone)]
pub struct HttpOrderClient {
    http: reqwest::Client,
    endpoint: Endpoint,
}

impl HttpOrderClient {
    pub fn new(http: reqwest::Client, endpoint: Endpoint) -> Self {
        Self { http, endpoint }
    }

    fn headers(&self) -> HeaderMap {
        compose_headers(self.endpoint.api_key(), &HeaderMap::new())
    }
}

#[async_trait]
impl OrderClient for HttpOrderClient {
    async fn create(
        &self,
        items: &[CartItem],
        idempotency_key: &str,
    ) -> Result<Order, ClientError> {
        let request = self
            .http
            .post(self.endpoint.url("/orders"))
            .headers(self.headers())
            .header(IDEMPOTENCY_KEY_HEADER, idempotency_key)
            .json(items);
        send_json(Service::Order, request).await
    }

    async fn list(&self) -> Result<Vec<Order>, ClientError> {
        let request = self
            .http
            .get(self.endpoint.url("/orders"))
            .headers(self.headers());
        send_json(Service::Order, request).await
    }

    async fn get(&self, id: &str) -> Result<Order, ClientError> {
        let request = self
            .http
            .get(self.endpoint.url(&format!("/orders/{id}")))
            .headers(self.headers());
        send_json(Service::Order, request).await
    }

    async fn update_status(&self, id: &str, status: OrderStatus) -> Result<Order, ClientError> {
        let request = self
            .http
            .patch(self.endpoint.url(&format!("/orders/{id}")))
            .headers(self.headers())
            .json(&StatusPatch { status });
        send_json(Service::Order, request).await
    }
}

#[derive(Debug, Default)]
struct InMemoryOrderState {
    orders: Vec<Order>,
    by_idempotency_key: HashMap<String, String>,
    next_id: u32,
    fail_on_create: bool,
    fail_on_update: bool,
    create_calls: u32,
    update_calls: u32,
}

/// In-memory order store for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderClient {
    state: Arc<RwLock<InMemoryOrderState>>,
}

impl InMemoryOrderClient {
    /// Creates an empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to fail order creation with a 500.
    pub fn set_fail_on_create(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create = fail;
    }

    /// Configures the store to fail status updates with a 500.
    pub fn set_fail_on_update(&self, fail: bool) {
        self.state.write().unwrap().fail_on_update = fail;
    }

    /// Number of stored orders.
    pub fn order_count(&self) -> usize {
        self.state.read().unwrap().orders.len()
    }

    /// Number of create calls made, including failed ones.
    pub fn create_calls(&self) -> u32 {
        self.state.read().unwrap().create_calls
    }

    /// Number of status-update calls made, including failed ones.
    pub fn update_calls(&self) -> u32 {
        self.state.read().unwrap().update_calls
    }
}

fn total_amount(items: &[CartItem]) -> f64 {
    items
        .iter()
        .map(|item| item.price * f64::from(item.quantity))
        .sum()
}

#[async_trait]
impl OrderClient for InMemoryOrderClient {
    async fn create(
        &self,
        items: &[CartItem],
        idempotency_key: &str,
    ) -> Result<Order, ClientError> {
        let mut state = self.state.write().unwrap();
        state.create_calls += 1;

        if state.fail_on_create {
            return Err(ClientError::Status {
                service: Service::Order,
                status: 500,
            });
        }

        if let Some(existing_id) = state.by_idempotency_key.get(idempotency_key) {
            let existing = state
                .orders
                .iter()
                .find(|order| &order.id == existing_id)
                .cloned();
            if let Some(order) = existing {
                return Ok(order);
            }
        }

        state.next_id += 1;
        let order = Order {
            id: format!("ORD-{:04}", state.next_id),
            items: items.to_vec(),
            status: OrderStatus::Pending,
            total_amount: total_amount(items),
            created_at: Utc::now(),
            updated_at: None,
        };
        state
            .by_idempotency_key
            .insert(idempotency_key.to_string(), order.id.clone());
        state.orders.push(order.clone());
        Ok(order)
    }

    async fn list(&self) -> Result<Vec<Order>, ClientError> {
        Ok(self.state.read().unwrap().orders.clone())
    }

    async fn get(&self, id: &str) -> Result<Order, ClientError> {
        self.state
            .read()
            .unwrap()
            .orders
            .iter()
            .find(|order| order.id == id)
            .cloned()
            .ok_or(ClientError::Status {
                service: Service::Order,
                status: 404,
            })
    }

    async fn update_status(&self, id: &str, status: OrderStatus) -> Result<Order, ClientError> {
        let mut state = self.state.write().unwrap();
        state.update_calls += 1;

        if state.fail_on_update {
            return Err(ClientError::Status {
                service: Service::Order,
                status: 500,
            });
        }

        let order = state
            .orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or(ClientError::Status {
                service: Service::Order,
                status: 404,
            })?;
        order.status = status;
        order.updated_at = Some(Utc::now());
        Ok(order.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<CartItem> {
        vec![
            CartItem {
                id: 1,
                name: "Widget".to_string(),
                price: 9.99,
                quantity: 2,
            },
            CartItem {
                id: 2,
                name: "Gadget".to_string(),
                price: 25.0,
                quantity: 1,
            },
        ]
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids_and_totals() {
        let client = InMemoryOrderClient::new();

        let first = client.create(&items(), "key-1").await.unwrap();
        let second = client.create(&items(), "key-2").await.unwrap();

        assert_eq!(first.id, "ORD-0001");
        assert_eq!(second.id, "ORD-0002");
        assert_eq!(first.status, OrderStatus::Pending);
        assert!((first.total_amount - 44.98).abs() < 1e-9);
        assert_eq!(client.order_count(), 2);
    }

    #[tokio::test]
    async fn test_create_deduplicates_on_idempotency_key() {
        let client = InMemoryOrderClient::new();

        let first = client.create(&items(), "key-1").await.unwrap();
        let replay = client.create(&items(), "key-1").await.unwrap();

        assert_eq!(first.id, replay.id);
        assert_eq!(client.order_count(), 1);
        assert_eq!(client.create_calls(), 2);
    }

    #[tokio::test]
    async fn test_get_unknown_order_is_404() {
        let client = InMemoryOrderClient::new();
        let err = client.get("ORD-9999").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_update_status_stamps_updated_at() {
        let client = InMemoryOrderClient::new();
        let order = client.create(&items(), "key-1").await.unwrap();
        assert!(order.updated_at.is_none());

        let updated = client
            .update_status(&order.id, OrderStatus::Completed)
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Completed);
        assert!(updated.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_fail_on_create() {
        let client = InMemoryOrderClient::new();
        client.set_fail_on_create(true);

        let result = client.create(&items(), "key-1").await;
        assert!(result.is_err());
        assert_eq!(client.order_count(), 0);
        assert_eq!(client.create_calls(), 1);
    }
}
