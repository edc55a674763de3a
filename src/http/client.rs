use std::time::Duration;

use crate::error::ProxyError;
use crate::http::error::map_reqwest_error;

/// Sends an outbound call under the per-request deadline. The deadline
/// covers the whole exchange including body download; a hung upstream
/// connection cannot outlive it.
pub async fn send_with_deadline(
    request_builder: reqwest::RequestBuilder,
    deadline: Duration,
) -> Result<reqwest::Response, ProxyError> {
    request_builder
        .timeout(deadline)
        .send()
        .await
        .map_err(map_reqwest_error)
}
