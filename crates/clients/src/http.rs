//! Shared plumbing for the HTTP client implementations.

use serde::de::DeserializeOwned;

use crate::error::{ClientError, Service};

/// Sends a request and maps the two failure classes: transport errors and
/// non-success downstream statuses.
pub(crate) async fn send(
    service: Service,
    request: reqwest::RequestBuilder,
) -> Result<reqwest::Response, ClientError> {
    let response = request
        .send()
        .await
        .map_err(|source| ClientError::Transport { service, source })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Status {
            service,
            status: status.as_u16(),
        });
    }
    Ok(response)
}

/// Sends a request and decodes a JSON response body.
pub(crate) async fn send_json<T: DeserializeOwned>(
    service: Service,
    request: reqwest::RequestBuilder,
) -> Result<T, ClientError> {
    let response = send(service, request).await?;
    response
        .json()
        .await
        .map_err(|source| ClientError::Decode { service, source })
}
