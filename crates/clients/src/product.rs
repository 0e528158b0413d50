//! Product service client: trait, HTTP implementation, in-memory double.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::Product;
use reqwest::header::HeaderMap;

use crate::endpoint::Endpoint;
use crate::error::{ClientError, Service};
use crate::headers::compose_headers;
use crate::http::send_json;

/// Read-only access to the product catalog.
#[async_trait]
pub trait ProductClient: Send + Sync {
    /// Fetches the full catalog.
    async fn list(&self) -> Result<Vec<Product>, ClientError>;

    /// Fetches a single product by id.
    async fn get(&self, id: i64) -> Result<Product, ClientError>;

    /// Searches the catalog. Only supplied filters are forwarded; absent
    /// parameters are omitted from the downstream query string entirely.
    async fn search(
        &self,
        query: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<Product>, ClientError>;
}

/// Builds the downstream query pairs from the supplied filters.
fn search_params(query: Option<&str>, category: Option<&str>) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(query) = query {
        params.push(("query", query.to_string()));
    }
    if let Some(category) = category {
        params.push(("category", category.to_string()));
    }
    params
}

/// HTTP client for the product service.
#[derive(Debug, Clone)]
pub struct HttpProductClient {
    http: reqwest::Client,
    endpoint: Endpoint,
}

impl HttpProductClient {
    pub fn new(http: reqwest::Client, endpoint: Endpoint) -> Self {
        Self { http, endpoint }
    }

    fn headers(&self) -> HeaderMap {
        compose_headers(self.endpoint.api_key(), &HeaderMap::new())
    }
}

#[async_trait]
impl ProductClient for HttpProductClient {
    async fn list(&self) -> Result<Vec<Product>, ClientError> {
        let request = self
            .http
            .get(self.endpoint.url("/products"))
            .headers(self.headers());
        send_json(Service::Product, request).await
    }

    async fn get(&self, id: i64) -> Result<Product, ClientError> {
        let request = self
            .http
            .get(self.endpoint.url(&format!("/products/{id}")))
            .headers(self.headers());
        send_json(Service::Product, request).await
    }

    async fn search(
        &self,
        query: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<Product>, ClientError> {
        let request = self
            .http
            .get(self.endpoint.url("/products/search"))
            .headers(self.headers())
            .query(&search_params(query, category));
        send_json(Service::Product, request).await
    }
}

#[derive(Debug, Default)]
struct InMemoryProductState {
    products: Vec<Product>,
    fail_on_request: bool,
}

/// In-memory product catalog for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProductClient {
    state: Arc<RwLock<InMemoryProductState>>,
}

impl InMemoryProductClient {
    /// Creates an empty in-memory catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog seeded with the given products.
    pub fn with_products(products: Vec<Product>) -> Self {
        let client = Self::default();
        client.state.write().unwrap().products = products;
        client
    }

    /// Configures the client to fail every request with a 500.
    pub fn set_fail_on_request(&self, fail: bool) {
        self.state.write().unwrap().fail_on_request = fail;
    }
}

impl InMemoryProductClient {
    fn check_fail(&self) -> Result<(), ClientError> {
        if self.state.read().unwrap().fail_on_request {
            return Err(ClientError::Status {
                service: Service::Product,
                status: 500,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ProductClient for InMemoryProductClient {
    async fn list(&self) -> Result<Vec<Product>, ClientError> {
        self.check_fail()?;
        Ok(self.state.read().unwrap().products.clone())
    }

    async fn get(&self, id: i64) -> Result<Product, ClientError> {
        self.check_fail()?;
        self.state
            .read()
            .unwrap()
            .products
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .ok_or(ClientError::Status {
                service: Service::Product,
                status: 404,
            })
    }

    async fn search(
        &self,
        query: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<Product>, ClientError> {
        self.check_fail()?;
        let needle = query.map(str::to_lowercase);
        let products = self
            .state
            .read()
            .unwrap()
            .products
            .iter()
            .filter(|product| match &needle {
                Some(needle) => product.name.to_lowercase().contains(needle),
                None => true,
            })
            .filter(|product| match category {
                Some(category) => product.category.as_deref() == Some(category),
                None => true,
            })
            .cloned()
            .collect();
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> InMemoryProductClient {
        InMemoryProductClient::with_products(vec![
            Product {
                id: 1,
                name: "Laptop".to_string(),
                price: 999.99,
                category: Some("electronics".to_string()),
                description: None,
            },
            Product {
                id: 2,
                name: "Phone".to_string(),
                price: 499.99,
                category: Some("electronics".to_string()),
                description: None,
            },
            Product {
                id: 3,
                name: "Desk".to_string(),
                price: 149.99,
                category: Some("furniture".to_string()),
                description: None,
            },
        ])
    }

    #[test]
    fn search_params_omit_absent_filters() {
        assert!(search_params(None, None).is_empty());
        assert_eq!(
            search_params(Some("phone"), None),
            vec![("query", "phone".to_string())]
        );
        assert_eq!(
            search_params(None, Some("electronics")),
            vec![("category", "electronics".to_string())]
        );
        assert_eq!(search_params(Some("a"), Some("b")).len(), 2);
    }

    #[tokio::test]
    async fn test_list_and_get() {
        let client = catalog();
        assert_eq!(client.list().await.unwrap().len(), 3);
        assert_eq!(client.get(2).await.unwrap().name, "Phone");
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_404() {
        let client = catalog();
        let err = client.get(99).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_search_filters_compose() {
        let client = catalog();

        let by_query = client.search(Some("lap"), None).await.unwrap();
        assert_eq!(by_query.len(), 1);
        assert_eq!(by_query[0].id, 1);

        let by_category = client.search(None, Some("electronics")).await.unwrap();
        assert_eq!(by_category.len(), 2);

        let both = client
            .search(Some("phone"), Some("furniture"))
            .await
            .unwrap();
        assert!(both.is_empty());
    }

    #[tokio::test]
    async fn test_fail_switch() {
        let client = catalog();
        client.set_fail_on_request(true);
        assert_eq!(client.list().await.unwrap_err().status(), Some(500));
    }
}
