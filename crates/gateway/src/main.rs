//! Gateway entry point.

use clients::{Endpoint, HttpCartClient, HttpOrderClient, HttpProductClient};
use gateway::config::Config;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

#[tokio::main]
async fn main() {
    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let prometheus_builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let metrics_handle = prometheus_builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Load configuration and build the downstream clients, sharing one
    //    HTTP client so every outbound call carries the same timeout ceiling.
    let config = Config::from_env();
    let http = reqwest::Client::builder()
        .timeout(config.downstream_timeout)
        .build()
        .expect("failed to build HTTP client");

    let products = HttpProductClient::new(
        http.clone(),
        Endpoint::new(&config.product.url, config.product.api_key.clone()),
    );
    let cart = HttpCartClient::new(
        http.clone(),
        Endpoint::new(&config.cart.url, config.cart.api_key.clone()),
    );
    let orders = HttpOrderClient::new(
        http,
        Endpoint::new(&config.order.url, config.order.api_key.clone()),
    );

    // 4. Wire application state and build the router
    let state = gateway::create_state(products, cart, orders);
    let app = gateway::create_app(state, metrics_handle);

    // 5. Start server
    let addr = config.addr();
    tracing::info!(
        %addr,
        product_url = %config.product.url,
        cart_url = %config.cart.url,
        order_url = %config.order.url,
        timeout_secs = config.downstream_timeout.as_secs(),
        "starting storefront gateway"
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("gateway shut down gracefully");
}
