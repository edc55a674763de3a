pub mod audio;
pub mod chat;
pub mod types;

use std::time::Duration;

use crate::constants::UPSTREAM_BODY_SNIPPET_CHARS;
use crate::error::ProxyError;

/// Handle on the upstream OpenAI-compatible API for one request's lifetime
pub struct UpstreamClient<'a> {
    pub client: &'a reqwest::Client,
    pub base_url: &'a str,
    pub api_key: &'a str,
    pub timeout: Duration,
}

impl<'a> UpstreamClient<'a> {
    pub fn new(
        client: &'a reqwest::Client,
        base_url: &'a str,
        api_key: &'a str,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            base_url,
            api_key,
            timeout,
        }
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), endpoint)
    }
}

/// Classifies a non-2xx upstream reply, keeping a bounded body snippet for
/// the caller-visible error
pub async fn reject_error_status(response: reqwest::Response) -> Result<reqwest::Response, ProxyError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let snippet: String = body.chars().take(UPSTREAM_BODY_SNIPPET_CHARS).collect();
    Err(ProxyError::upstream_error(status.as_u16(), snippet.trim()))
}
