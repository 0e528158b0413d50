//! Client error types.

use thiserror::Error;

/// Logical name of a downstream service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Product,
    Cart,
    Order,
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Service::Product => "product",
            Service::Cart => "cart",
            Service::Order => "order",
        };
        write!(f, "{name}")
    }
}

/// Errors from a downstream service call.
///
/// `Status` carries the downstream status code so route handlers can relay
/// it to the caller; transport and decode failures have no meaningful status
/// and surface as internal errors instead.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Downstream responded with a non-success status.
    #[error("{service} service returned status {status}")]
    Status { service: Service, status: u16 },

    /// The request never completed (connect failure, timeout).
    #[error("{service} service request failed: {source}")]
    Transport {
        service: Service,
        #[source]
        source: reqwest::Error,
    },

    /// Downstream responded with a body that did not match the contract.
    #[error("{service} service returned a malformed payload: {source}")]
    Decode {
        service: Service,
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    /// The downstream status code, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The service the failing call targeted.
    pub fn service(&self) -> Service {
        match self {
            ClientError::Status { service, .. }
            | ClientError::Transport { service, .. }
            | ClientError::Decode { service, .. } => *service,
        }
    }
}

/// Convenience type alias for client results.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_accessor_only_for_status_errors() {
        let err = ClientError::Status {
            service: Service::Cart,
            status: 503,
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.service(), Service::Cart);
    }

    #[test]
    fn display_names_the_service() {
        let err = ClientError::Status {
            service: Service::Product,
            status: 404,
        };
        assert_eq!(err.to_string(), "product service returned status 404");
    }
}
