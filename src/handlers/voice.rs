use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Value;

use crate::error::ProxyError;
use crate::handlers::RequestContext;
use crate::prompt::Mode;
use crate::text::{clean_model_output, truncate_output};
use crate::upstream::audio::transcribe_audio;

/// Audio pipeline: size gate, base64 decode, multipart upstream call,
/// then the same sanitize/truncate pass text modes get.
pub async fn run_audio(
    context: &RequestContext<'_>,
    mode: Mode,
    body: &Value,
) -> Result<String, ProxyError> {
    let audio_b64 = body
        .get("audioBase64")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .ok_or_else(|| ProxyError::missing_param("audioBase64"))?;

    let max_bytes = context.config.max_audio_bytes;

    // 4 base64 chars decode to 3 bytes; reject oversize payloads before
    // spending memory on the decode
    let estimated_bytes = audio_b64.len() / 4 * 3;
    if estimated_bytes > max_bytes {
        return Err(ProxyError::payload_too_large(&format!(
            "audio payload ~{} bytes exceeds limit of {}",
            estimated_bytes, max_bytes
        )));
    }

    let audio = BASE64
        .decode(audio_b64)
        .map_err(|e| ProxyError::bad_request(&format!("invalid base64 audio payload: {}", e)))?;

    if audio.is_empty() {
        return Err(ProxyError::bad_request("empty audio payload"));
    }
    if audio.len() > max_bytes {
        return Err(ProxyError::payload_too_large(&format!(
            "audio payload {} bytes exceeds limit of {}",
            audio.len(),
            max_bytes
        )));
    }

    let language = body.get("language").and_then(Value::as_str);

    let upstream = context.upstream();
    let raw = transcribe_audio(&upstream, mode, audio, &context.config.audio_model, language)
        .await?;

    let cleaned = clean_model_output(&raw);
    Ok(truncate_output(&cleaned, context.config.max_output_chars))
}
