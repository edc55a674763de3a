use std::time::Duration;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "multiling-proxy")]
#[command(about = "proxy forwarding spreadsheet chat and transcription requests to the OpenAI API")]
pub struct Config {
    #[arg(
        long,
        env = "PROXY_LISTEN",
        default_value = "0.0.0.0:8787",
        help = "server listen address"
    )]
    pub listen: String,

    #[arg(
        long,
        env = "OPENAI_BASE_URL",
        default_value = "https://api.openai.com/v1",
        help = "upstream API base url"
    )]
    pub upstream_url: String,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, help = "upstream API key")]
    pub api_key: String,

    #[arg(
        long,
        env = "PROXY_SHARED_SECRET",
        hide_env_values = true,
        help = "shared secret callers must present"
    )]
    pub shared_secret: String,

    #[arg(
        long,
        env = "PROXY_CHAT_MODEL",
        default_value = "gpt-4o-mini",
        help = "model for text modes"
    )]
    pub chat_model: String,

    #[arg(
        long,
        env = "PROXY_COACH_MODEL",
        help = "model override for coach mode (defaults to the chat model)"
    )]
    pub coach_model: Option<String>,

    #[arg(
        long,
        env = "PROXY_AUDIO_MODEL",
        default_value = "whisper-1",
        help = "model for transcription and translation"
    )]
    pub audio_model: String,

    #[arg(
        long,
        env = "PROXY_CHUNK_SIZE",
        default_value = "1800",
        help = "maximum chars per upstream text call; longer input is split"
    )]
    pub chunk_size: usize,

    #[arg(
        long,
        env = "PROXY_CHUNK_PARALLELISM",
        default_value = "2",
        help = "maximum in-flight upstream calls when chunking"
    )]
    pub chunk_parallelism: usize,

    #[arg(
        long,
        env = "PROXY_MAX_OUTPUT_CHARS",
        default_value = "12000",
        help = "maximum chars returned to the caller before truncation"
    )]
    pub max_output_chars: usize,

    #[arg(
        long,
        env = "PROXY_MAX_AUDIO_BYTES",
        default_value = "3145728",
        help = "maximum decoded audio payload size in bytes"
    )]
    pub max_audio_bytes: usize,

    #[arg(
        long,
        env = "PROXY_REQUEST_TIMEOUT",
        default_value = "20",
        help = "deadline for a single upstream call in seconds"
    )]
    pub request_timeout_seconds: u64,

    #[arg(
        long,
        env = "PROXY_LOG_LEVEL",
        default_value = "info",
        help = "log level (off, error, warn, info, debug, trace)"
    )]
    pub log_level: String,
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    pub fn coach_model(&self) -> &str {
        self.coach_model.as_deref().unwrap_or(&self.chat_model)
    }
}

pub fn validate_config(config: &Config) -> Result<(), String> {
    if config.listen.parse::<std::net::SocketAddr>().is_err() {
        return Err(format!("invalid listen address: {}", config.listen));
    }
    if !config.upstream_url.starts_with("http://") && !config.upstream_url.starts_with("https://") {
        return Err(format!(
            "invalid upstream URL (must start with http:// or https://): {}",
            config.upstream_url
        ));
    }
    if let Err(e) = url::Url::parse(&config.upstream_url) {
        return Err(format!("invalid upstream URL format: {}", e));
    }
    if config.api_key.trim().is_empty() {
        return Err("upstream API key must not be empty".to_string());
    }
    if config.shared_secret.trim().is_empty() {
        return Err("shared secret must not be empty".to_string());
    }
    if config.chunk_size == 0 {
        return Err("chunk size must be greater than zero".to_string());
    }
    if config.chunk_parallelism == 0 {
        return Err("chunk parallelism must be greater than zero".to_string());
    }
    if config.max_output_chars == 0 {
        return Err("max output chars must be greater than zero".to_string());
    }
    if config.request_timeout_seconds == 0 {
        return Err("request timeout must be greater than zero".to_string());
    }
    Ok(())
}
