//! Product passthrough endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use clients::{CartClient, OrderClient, ProductClient};
use common::Product;
use serde::Deserialize;

use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub category: Option<String>,
}

/// GET /products — relay the product catalog.
#[tracing::instrument(skip(state))]
pub async fn list<P: ProductClient, C: CartClient, O: OrderClient>(
    State(state): State<Arc<AppState<P, C, O>>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state
        .products
        .list()
        .await
        .map_err(|e| ApiError::from_client(e, "Failed to fetch products"))?;
    Ok(Json(products))
}

/// GET /products/search — forward only the filters the caller supplied.
#[tracing::instrument(skip(state))]
pub async fn search<P: ProductClient, C: CartClient, O: OrderClient>(
    State(state): State<Arc<AppState<P, C, O>>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state
        .products
        .search(params.query.as_deref(), params.category.as_deref())
        .await
        .map_err(|e| ApiError::from_client(e, "Failed to search products"))?;
    Ok(Json(products))
}

/// GET /products/{id} — relay a single product.
#[tracing::instrument(skip(state))]
pub async fn get<P: ProductClient, C: CartClient, O: OrderClient>(
    State(state): State<Arc<AppState<P, C, O>>>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, ApiError> {
    let product = state
        .products
        .get(id)
        .await
        .map_err(|e| ApiError::from_client(e, "Product not found"))?;
    Ok(Json(product))
}
