use std::error::Error;
use std::fmt;

use warp::reject::Reject;

use crate::constants::{
    CODE_INTERNAL_ERROR, CODE_INVALID_KEY, CODE_MISSING_PARAM, CODE_PAYLOAD_TOO_LARGE,
    CODE_UNKNOWN_MODE, CODE_UPSTREAM_ERROR, CODE_UPSTREAM_TIMEOUT, ERROR_UPSTREAM_TIMEOUT,
};

/// Error type for the proxy. Every failure is terminal for the request and
/// surfaces as `{ok:false, error:<code>}` with the matching HTTP status.
#[derive(Debug, Clone)]
pub struct ProxyError {
    pub message: String,
    pub status_code: u16,
    kind: ProxyErrorKind,
}

#[derive(Debug, Clone)]
enum ProxyErrorKind {
    InvalidKey,
    MissingParam,
    UnknownMode,
    PayloadTooLarge,
    Upstream,
    UpstreamTimeout,
    Internal,
}

impl ProxyError {
    pub fn invalid_key() -> Self {
        Self {
            message: "missing or invalid shared secret".to_string(),
            status_code: 401,
            kind: ProxyErrorKind::InvalidKey,
        }
    }

    pub fn missing_param(field: &str) -> Self {
        Self {
            message: format!("missing required field '{}'", field),
            status_code: 400,
            kind: ProxyErrorKind::MissingParam,
        }
    }

    /// Validation failure that is not a plain absent field (bad tone code,
    /// undecodable base64, malformed JSON). Shares the MissingParam code.
    pub fn bad_request(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status_code: 400,
            kind: ProxyErrorKind::MissingParam,
        }
    }

    pub fn unknown_mode(mode: &str) -> Self {
        Self {
            message: format!("unknown mode '{}'", mode),
            status_code: 400,
            kind: ProxyErrorKind::UnknownMode,
        }
    }

    pub fn payload_too_large(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status_code: 413,
            kind: ProxyErrorKind::PayloadTooLarge,
        }
    }

    pub fn upstream_error(upstream_status: u16, body_snippet: &str) -> Self {
        Self {
            message: format!("upstream returned {}: {}", upstream_status, body_snippet),
            status_code: 502,
            kind: ProxyErrorKind::Upstream,
        }
    }

    pub fn upstream_unreachable(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status_code: 502,
            kind: ProxyErrorKind::Upstream,
        }
    }

    pub fn upstream_timeout() -> Self {
        Self {
            message: ERROR_UPSTREAM_TIMEOUT.to_string(),
            status_code: 504,
            kind: ProxyErrorKind::UpstreamTimeout,
        }
    }

    pub fn internal(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status_code: 500,
            kind: ProxyErrorKind::Internal,
        }
    }

    /// Stable code string reported in the envelope
    pub fn code(&self) -> &'static str {
        match self.kind {
            ProxyErrorKind::InvalidKey => CODE_INVALID_KEY,
            ProxyErrorKind::MissingParam => CODE_MISSING_PARAM,
            ProxyErrorKind::UnknownMode => CODE_UNKNOWN_MODE,
            ProxyErrorKind::PayloadTooLarge => CODE_PAYLOAD_TOO_LARGE,
            ProxyErrorKind::Upstream => CODE_UPSTREAM_ERROR,
            ProxyErrorKind::UpstreamTimeout => CODE_UPSTREAM_TIMEOUT,
            ProxyErrorKind::Internal => CODE_INTERNAL_ERROR,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, ProxyErrorKind::UpstreamTimeout)
    }
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProxyError {} ({}): {}", self.code(), self.status_code, self.message)
    }
}

impl Error for ProxyError {}

impl Reject for ProxyError {}
