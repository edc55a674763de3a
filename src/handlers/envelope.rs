use serde_json::{Value, json};

use crate::error::ProxyError;

/// Uniform reply body: `{ok, mode, text, error, sid}`. Every code path,
/// success or failure, funnels into this shape.
pub fn success(mode: &str, text: &str, sid: Option<&str>) -> Value {
    json!({
        "ok": true,
        "mode": mode,
        "text": text,
        "error": Value::Null,
        "sid": sid,
    })
}

pub fn failure(err: &ProxyError, mode: Option<&str>, sid: Option<&str>) -> Value {
    json!({
        "ok": false,
        "mode": mode,
        "text": "",
        "error": err.code(),
        "sid": sid,
    })
}
