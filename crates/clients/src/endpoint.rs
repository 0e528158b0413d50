//! Downstream endpoint description.

/// Location of one downstream service: a base URL plus an optional API key.
///
/// The base URL is normalized at construction so path joins never produce
/// a double slash.
#[derive(Debug, Clone)]
pub struct Endpoint {
    base_url: String,
    api_key: Option<String>,
}

impl Endpoint {
    /// Creates an endpoint, stripping any trailing slashes from the base URL.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, api_key }
    }

    /// The normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The configured API key, if any.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Joins a path (starting with `/`) onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_slashes() {
        let endpoint = Endpoint::new("http://localhost:3002///", None);
        assert_eq!(endpoint.base_url(), "http://localhost:3002");
    }

    #[test]
    fn joins_paths_without_double_slash() {
        let endpoint = Endpoint::new("http://localhost:3001/", None);
        assert_eq!(endpoint.url("/products"), "http://localhost:3001/products");
    }

    #[test]
    fn keeps_api_key() {
        let endpoint = Endpoint::new("http://localhost:3003", Some("secret".to_string()));
        assert_eq!(endpoint.api_key(), Some("secret"));
    }
}
