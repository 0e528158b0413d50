//! Order passthrough endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use clients::{CartClient, OrderClient, ProductClient};
use common::{Order, OrderStatus};
use serde::Deserialize;

use crate::AppState;
use crate::error::ApiError;
use crate::extract::JsonBody;

/// Body of PATCH /orders/{id}. The status field uses the closed status set,
/// so unknown status strings are rejected at the boundary.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: Option<OrderStatus>,
}

/// GET /orders — relay the order history.
#[tracing::instrument(skip(state))]
pub async fn list<P: ProductClient, C: CartClient, O: OrderClient>(
    State(state): State<Arc<AppState<P, C, O>>>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = state
        .orders
        .list()
        .await
        .map_err(|e| ApiError::from_client(e, "Failed to fetch orders"))?;
    Ok(Json(orders))
}

/// GET /orders/{id} — relay a single order.
#[tracing::instrument(skip(state))]
pub async fn get<P: ProductClient, C: CartClient, O: OrderClient>(
    State(state): State<Arc<AppState<P, C, O>>>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let order = state
        .orders
        .get(&id)
        .await
        .map_err(|e| ApiError::from_client(e, "Order not found"))?;
    Ok(Json(order))
}

/// PATCH /orders/{id} — forward a status update and relay the updated order.
///
/// Only membership in the status set is checked here; whether a particular
/// transition is legal remains the order service's decision.
#[tracing::instrument(skip(state, req))]
pub async fn update_status<P: ProductClient, C: CartClient, O: OrderClient>(
    State(state): State<Arc<AppState<P, C, O>>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateOrderStatusRequest>,
) -> Result<Json<Order>, ApiError> {
    let status = req
        .status
        .ok_or_else(|| ApiError::BadRequest("Missing required field: status".to_string()))?;

    let order = state
        .orders
        .update_status(&id, status)
        .await
        .map_err(|e| ApiError::from_client(e, "Failed to update order status"))?;
    Ok(Json(order))
}
