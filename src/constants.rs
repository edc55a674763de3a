/// Upstream OpenAI API endpoints (joined onto the configured base URL)
pub const UPSTREAM_CHAT_COMPLETIONS: &str = "/chat/completions";
pub const UPSTREAM_AUDIO_TRANSCRIPTIONS: &str = "/audio/transcriptions";
pub const UPSTREAM_AUDIO_TRANSLATIONS: &str = "/audio/translations";

/// Per-mode sampling temperatures
pub const TEMPERATURE_CHAT: f32 = 0.7;
pub const TEMPERATURE_COACH: f32 = 0.6;
pub const TEMPERATURE_FIX: f32 = 0.4;
pub const TEMPERATURE_CLEAN: f32 = 0.1;

/// Error codes reported in the response envelope
pub const CODE_INVALID_KEY: &str = "InvalidKey";
pub const CODE_MISSING_PARAM: &str = "MissingParam";
pub const CODE_UNKNOWN_MODE: &str = "UnknownMode";
pub const CODE_PAYLOAD_TOO_LARGE: &str = "PayloadTooLarge";
pub const CODE_UPSTREAM_ERROR: &str = "UpstreamError";
pub const CODE_UPSTREAM_TIMEOUT: &str = "UpstreamTimeout";
pub const CODE_INTERNAL_ERROR: &str = "InternalError";
pub const CODE_NOT_FOUND: &str = "NotFound";
pub const CODE_METHOD_NOT_ALLOWED: &str = "MethodNotAllowed";

/// Response headers
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";
pub const HEADER_CACHE_CONTROL: &str = "no-cache";
pub const HEADER_ACCESS_CONTROL_ALLOW_ORIGIN: &str = "*";
pub const HEADER_ACCESS_CONTROL_ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub const HEADER_ACCESS_CONTROL_ALLOW_HEADERS: &str = "Content-Type, X-Api-Key";

/// Audio upload form constants (upstream multipart part)
pub const AUDIO_PART_FILE_NAME: &str = "audio.m4a";
pub const AUDIO_PART_MIME: &str = "audio/mp4";

/// Appended when output exceeds the configured maximum length
pub const TRUNCATION_MARKER: &str = "…[truncated]";

/// How much of an upstream error body is carried into the reported error
pub const UPSTREAM_BODY_SNIPPET_CHARS: usize = 300;

/// Error messages
pub const ERROR_UPSTREAM_UNREACHABLE: &str = "upstream API not reachable";
pub const ERROR_UPSTREAM_TIMEOUT: &str = "upstream call exceeded deadline";

/// Logging prefixes
pub const LOG_PREFIX_SUCCESS: &str = "✅";
pub const LOG_PREFIX_ERROR: &str = "❌";
pub const LOG_PREFIX_WARNING: &str = "⚠️";

/// Maximum accepted JSON body size (bytes); matches the 3 MB inbound limit
/// the spreadsheet client was built against
pub const MAX_JSON_BODY_SIZE_BYTES: u64 = 3 * 1024 * 1024;
