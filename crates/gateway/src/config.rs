//! Gateway configuration loaded from environment variables.

use std::time::Duration;

/// Location and credentials for one downstream service.
#[derive(Debug, Clone)]
pub struct DownstreamTarget {
    pub url: String,
    pub api_key: Option<String>,
}

impl DownstreamTarget {
    fn from_env(url_var: &str, key_var: &str, default_url: &str) -> Self {
        let url = std::env::var(url_var).unwrap_or_else(|_| default_url.to_string());
        Self {
            url: normalize_url(&url),
            api_key: std::env::var(key_var).ok(),
        }
    }
}

/// Gateway configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `PRODUCT_SERVICE_URL` / `CART_SERVICE_URL` / `ORDER_SERVICE_URL` —
///   downstream base URLs (defaults: `http://localhost:3001..3003`);
///   trailing slashes are stripped
/// - `PRODUCT_SERVICE_API_KEY` / `CART_SERVICE_API_KEY` /
///   `ORDER_SERVICE_API_KEY` — optional per-service API keys
/// - `DOWNSTREAM_TIMEOUT_SECS` — per-call ceiling on outbound requests
///   (default: `3`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub product: DownstreamTarget,
    pub cart: DownstreamTarget,
    pub order: DownstreamTarget,
    pub downstream_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            product: DownstreamTarget::from_env(
                "PRODUCT_SERVICE_URL",
                "PRODUCT_SERVICE_API_KEY",
                "http://localhost:3001",
            ),
            cart: DownstreamTarget::from_env(
                "CART_SERVICE_URL",
                "CART_SERVICE_API_KEY",
                "http://localhost:3002",
            ),
            order: DownstreamTarget::from_env(
                "ORDER_SERVICE_URL",
                "ORDER_SERVICE_API_KEY",
                "http://localhost:3003",
            ),
            downstream_timeout: Duration::from_secs(
                std::env::var("DOWNSTREAM_TIMEOUT_SECS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(3),
            ),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            product: DownstreamTarget {
                url: "http://localhost:3001".to_string(),
                api_key: None,
            },
            cart: DownstreamTarget {
                url: "http://localhost:3002".to_string(),
                api_key: None,
            },
            order: DownstreamTarget {
                url: "http://localhost:3003".to_string(),
                api_key: None,
            },
            downstream_timeout: Duration::from_secs(3),
        }
    }
}

/// Strips trailing slashes so path joins never produce a double slash.
fn normalize_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
