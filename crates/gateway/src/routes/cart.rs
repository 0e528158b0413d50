//! Cart endpoints.
//!
//! Request bodies are validated here, before any downstream call; the
//! merge-by-id policy and write serialization live in the cart coordinator.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use clients::{CartClient, OrderClient, ProductClient};
use common::CartItem;
use serde::Deserialize;

use crate::AppState;
use crate::error::ApiError;
use crate::extract::JsonBody;

// -- Request types --

/// Body of POST /cart. Required fields are modeled as options so a missing
/// one yields a structured 400 naming the field, not a bare rejection.
#[derive(Debug, Deserialize)]
pub struct AddCartItemRequest {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<u32>,
}

impl AddCartItemRequest {
    /// Validates required fields and applies the quantity default of 1.
    fn into_item(self) -> Result<CartItem, ApiError> {
        let mut missing = Vec::new();
        if self.id.is_none() {
            missing.push("id");
        }
        if self.name.is_none() {
            missing.push("name");
        }
        if self.price.is_none() {
            missing.push("price");
        }

        match (self.id, self.name, self.price) {
            (Some(id), Some(name), Some(price)) => Ok(CartItem {
                id,
                name,
                price,
                quantity: self.quantity.unwrap_or(1),
            }),
            _ => Err(ApiError::BadRequest(format!(
                "Missing required fields: {}",
                missing.join(", ")
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateCartItemRequest {
    pub quantity: Option<u32>,
}

// -- Handlers --

/// GET /cart — current cart contents.
#[tracing::instrument(skip(state))]
pub async fn get<P: ProductClient, C: CartClient, O: OrderClient>(
    State(state): State<Arc<AppState<P, C, O>>>,
) -> Result<Json<Vec<CartItem>>, ApiError> {
    Ok(Json(state.cart.current().await?))
}

/// POST /cart — add one line item, merged by id into the existing cart.
#[tracing::instrument(skip(state, req))]
pub async fn add<P: ProductClient, C: CartClient, O: OrderClient>(
    State(state): State<Arc<AppState<P, C, O>>>,
    JsonBody(req): JsonBody<AddCartItemRequest>,
) -> Result<(StatusCode, Json<Vec<CartItem>>), ApiError> {
    let item = req.into_item()?;
    let cart = state.cart.add_item(item).await?;
    Ok((StatusCode::CREATED, Json(cart)))
}

/// PUT /cart — replace the whole cart; responds with the re-read state.
#[tracing::instrument(skip(state, items))]
pub async fn replace<P: ProductClient, C: CartClient, O: OrderClient>(
    State(state): State<Arc<AppState<P, C, O>>>,
    JsonBody(items): JsonBody<Vec<CartItem>>,
) -> Result<Json<Vec<CartItem>>, ApiError> {
    Ok(Json(state.cart.replace(items).await?))
}

/// PATCH /cart/{id} — set one line item's quantity.
#[tracing::instrument(skip(state, req))]
pub async fn update_quantity<P: ProductClient, C: CartClient, O: OrderClient>(
    State(state): State<Arc<AppState<P, C, O>>>,
    Path(id): Path<i64>,
    JsonBody(req): JsonBody<UpdateCartItemRequest>,
) -> Result<Json<Vec<CartItem>>, ApiError> {
    let quantity = req
        .quantity
        .ok_or_else(|| ApiError::BadRequest("Missing required field: quantity".to_string()))?;
    Ok(Json(state.cart.update_quantity(id, quantity).await?))
}

/// DELETE /cart — empty the cart.
#[tracing::instrument(skip(state))]
pub async fn clear<P: ProductClient, C: CartClient, O: OrderClient>(
    State(state): State<Arc<AppState<P, C, O>>>,
) -> Result<StatusCode, ApiError> {
    state.cart.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}
