use crate::constants::{
    AUDIO_PART_FILE_NAME, AUDIO_PART_MIME, UPSTREAM_AUDIO_TRANSCRIPTIONS,
    UPSTREAM_AUDIO_TRANSLATIONS,
};
use crate::error::ProxyError;
use crate::http::send_with_deadline;
use crate::prompt::Mode;
use crate::upstream::types::TranscriptionResponse;
use crate::upstream::{UpstreamClient, reject_error_status};

/// Forwards raw audio bytes to the transcription or translation endpoint.
/// The language hint applies to transcription only; translation is
/// cross-lingual by definition and the upstream rejects a hint there.
pub async fn transcribe_audio(
    upstream: &UpstreamClient<'_>,
    mode: Mode,
    audio: Vec<u8>,
    model: &str,
    language: Option<&str>,
) -> Result<String, ProxyError> {
    let endpoint = match mode {
        Mode::Transcribe => UPSTREAM_AUDIO_TRANSCRIPTIONS,
        Mode::Translate => UPSTREAM_AUDIO_TRANSLATIONS,
        _ => return Err(ProxyError::internal("text mode routed to audio upstream")),
    };

    let file_part = reqwest::multipart::Part::bytes(audio)
        .file_name(AUDIO_PART_FILE_NAME)
        .mime_str(AUDIO_PART_MIME)
        .map_err(|e| ProxyError::internal(&format!("failed to build audio form part: {}", e)))?;

    let mut form = reqwest::multipart::Form::new()
        .part("file", file_part)
        .text("model", model.to_string());

    if mode == Mode::Transcribe
        && let Some(lang) = language
    {
        form = form.text("language", lang.to_string());
    }

    let url = upstream.endpoint_url(endpoint);
    let builder = upstream
        .client
        .post(&url)
        .bearer_auth(upstream.api_key)
        .multipart(form);

    let response = send_with_deadline(builder, upstream.timeout).await?;
    let response = reject_error_status(response).await?;

    let parsed: TranscriptionResponse = response
        .json()
        .await
        .map_err(|e| ProxyError::internal(&format!("invalid JSON from upstream: {}", e)))?;

    Ok(parsed.into_text().trim().to_string())
}
