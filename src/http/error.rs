use crate::constants::ERROR_UPSTREAM_UNREACHABLE;
use crate::error::ProxyError;

pub fn map_reqwest_error(err: reqwest::Error) -> ProxyError {
    if err.is_timeout() {
        ProxyError::upstream_timeout()
    } else if err.is_connect() {
        ProxyError::upstream_unreachable(ERROR_UPSTREAM_UNREACHABLE)
    } else {
        log::error!("HTTP request failed: {}", err);
        ProxyError::internal(&format!("upstream request failed: {}", err))
    }
}
