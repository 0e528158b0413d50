//! Checkout endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use clients::{CartClient, OrderClient, ProductClient};
use common::Order;

use crate::AppState;
use crate::error::ApiError;

/// POST /checkout — run the checkout sequence and relay the created order.
///
/// A 201 here means the order exists, independent of whether the follow-up
/// cart clear succeeded.
#[tracing::instrument(skip(state))]
pub async fn checkout<P: ProductClient, C: CartClient, O: OrderClient>(
    State(state): State<Arc<AppState<P, C, O>>>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = state.checkout.execute().await?;
    Ok((StatusCode::CREATED, Json(order)))
}
