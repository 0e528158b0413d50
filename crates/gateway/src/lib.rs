//! Storefront BFF gateway.
//!
//! A stateless HTTP gateway that fronts the product, cart, and order
//! services for the storefront UI. Cart consistency (merge-by-id,
//! serialized read-modify-write) and the checkout sequence live in the
//! `orchestration` crate; this crate supplies configuration, routing, and
//! error translation, with structured logging (tracing) and Prometheus
//! metrics.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get, patch, post, put};
use clients::{CartClient, OrderClient, ProductClient};
use metrics_exporter_prometheus::PrometheusHandle;
use orchestration::{CartCoordinator, CheckoutCoordinator};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state accessible from all handlers.
pub struct AppState<P: ProductClient, C: CartClient, O: OrderClient> {
    pub products: P,
    pub cart: CartCoordinator<C>,
    pub checkout: CheckoutCoordinator<C, O>,
    pub orders: O,
}

/// Wires the coordinators around the given downstream clients.
///
/// The checkout coordinator shares the cart coordinator's write lock, so
/// checkout and cart mutations serialize against each other.
pub fn create_state<P, C, O>(products: P, cart: C, orders: O) -> Arc<AppState<P, C, O>>
where
    P: ProductClient,
    C: CartClient + Clone,
    O: OrderClient + Clone,
{
    let cart = CartCoordinator::new(cart);
    let checkout = CheckoutCoordinator::new(cart.clone(), orders.clone());
    Arc::new(AppState {
        products,
        cart,
        checkout,
        orders,
    })
}

/// Terminal safety net: a panic that escapes a handler becomes a logged,
/// generic 500 instead of an aborted connection or a leaked backtrace.
fn panic_to_response(panic: Box<dyn std::any::Any + Send + 'static>) -> axum::response::Response {
    let detail = if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    };
    tracing::error!(panic = %detail, "handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(serde_json::json!({ "error": "Internal server error" })),
    )
        .into_response()
}

/// Creates the axum application router with all routes and shared state.
pub fn create_app<P, C, O>(
    state: Arc<AppState<P, C, O>>,
    metrics_handle: PrometheusHandle,
) -> Router
where
    P: ProductClient + 'static,
    C: CartClient + Clone + 'static,
    O: OrderClient + Clone + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/products", get(routes::products::list::<P, C, O>))
        .route("/products/search", get(routes::products::search::<P, C, O>))
        .route("/products/{id}", get(routes::products::get::<P, C, O>))
        .route("/cart", get(routes::cart::get::<P, C, O>))
        .route("/cart", post(routes::cart::add::<P, C, O>))
        .route("/cart", put(routes::cart::replace::<P, C, O>))
        .route("/cart", delete(routes::cart::clear::<P, C, O>))
        .route("/cart/{id}", patch(routes::cart::update_quantity::<P, C, O>))
        .route("/checkout", post(routes::checkout::checkout::<P, C, O>))
        .route("/orders", get(routes::orders::list::<P, C, O>))
        .route("/orders/{id}", get(routes::orders::get::<P, C, O>))
        .route("/orders/{id}", patch(routes::orders::update_status::<P, C, O>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_to_response))
}
