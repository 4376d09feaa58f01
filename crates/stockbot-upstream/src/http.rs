//! Shared transport helpers

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use stockbot_core::{UpstreamError, UpstreamResult};

/// Build a client whose every request is bounded by `timeout`
pub fn build_client(timeout: Duration) -> UpstreamResult<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| UpstreamError::Transport(e.to_string()))
}

/// Send a request and return the body of a 2xx response
pub(crate) async fn send_for_text(request: RequestBuilder) -> UpstreamResult<String> {
    let response = request.send().await.map_err(map_transport_error)?;
    let status = response.status();
    let body = response.text().await.map_err(map_transport_error)?;

    if !status.is_success() {
        return Err(UpstreamError::status(status.as_u16(), body));
    }
    Ok(body)
}

pub(crate) fn map_transport_error(error: reqwest::Error) -> UpstreamError {
    if error.is_timeout() {
        UpstreamError::Timeout
    } else {
        // The URL may carry an API key in its query string
        UpstreamError::Transport(error.without_url().to_string())
    }
}

/// Join a base URL and a path without doubling the slash
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
