mod routes_tests;
mod text_tests;

use crate::config::Config;

/// Config used across test files; the upstream URL points at a closed local
/// port so any call that should never happen fails fast instead of hanging.
pub fn test_config() -> Config {
    Config {
        listen: "127.0.0.1:0".to_string(),
        upstream_url: "http://127.0.0.1:9".to_string(),
        api_key: "sk-test".to_string(),
        shared_secret: "sekret".to_string(),
        chat_model: "gpt-4o-mini".to_string(),
        coach_model: None,
        audio_model: "whisper-1".to_string(),
        chunk_size: 1800,
        chunk_parallelism: 2,
        max_output_chars: 12000,
        max_audio_bytes: 1024,
        request_timeout_seconds: 2,
        log_level: "off".to_string(),
    }
}
