use serde_json::json;

use crate::config::Config;
use crate::http::json_response;

/// Liveness probe; echoes the config values that are safe to expose
pub fn handle_health(config: &Config) -> warp::reply::Response {
    json_response(&json!({
        "ok": true,
        "service": "multiling-proxy",
        "version": crate::VERSION,
        "time": chrono::Utc::now().to_rfc3339(),
        "chat_model": config.chat_model,
        "coach_model": config.coach_model(),
        "audio_model": config.audio_model,
        "chunk_size": config.chunk_size,
        "max_output_chars": config.max_output_chars,
        "max_audio_bytes": config.max_audio_bytes,
        "request_timeout_seconds": config.request_timeout_seconds,
    }))
}
