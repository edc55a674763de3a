use std::time::Instant;

use futures_util::stream::{self, StreamExt, TryStreamExt};
use serde_json::Value;

use crate::config::Config;
use crate::constants::LOG_PREFIX_SUCCESS;
use crate::error::ProxyError;
use crate::handlers::{RequestContext, envelope, voice};
use crate::http::{json_response, json_response_with_status};
use crate::logging::{log_timed, sanitize_log_message};
use crate::prompt::{Mode, Tone, resolve_prompt};
use crate::text::{clean_model_output, split_chunks, truncate_output};
use crate::upstream::chat::chat_completion;

/// Unified relay entry: authenticates, dispatches on mode family, and
/// always replies with the uniform envelope (errors included).
pub async fn handle_relay(
    context: RequestContext<'_>,
    header_key: Option<String>,
    body: Value,
) -> warp::reply::Response {
    let start_time = Instant::now();
    let sid = body.get("sid").and_then(Value::as_str).map(str::to_string);
    let mode_raw = body.get("mode").and_then(Value::as_str).map(str::to_string);

    match relay_inner(&context, header_key.as_deref(), &body).await {
        Ok((mode, text)) => {
            log_timed(
                LOG_PREFIX_SUCCESS,
                &format!("relay {} ({} chars)", mode.as_str(), text.chars().count()),
                start_time,
            );
            json_response(&envelope::success(mode.as_str(), &text, sid.as_deref()))
        }
        Err(err) => {
            log::warn!(
                "relay {} failed: {} [{}]",
                mode_raw.as_deref().unwrap_or("-"),
                sanitize_log_message(&err.message),
                err.code()
            );
            let status = warp::http::StatusCode::from_u16(err.status_code)
                .unwrap_or(warp::http::StatusCode::INTERNAL_SERVER_ERROR);
            json_response_with_status(
                &envelope::failure(&err, mode_raw.as_deref(), sid.as_deref()),
                status,
            )
        }
    }
}

async fn relay_inner(
    context: &RequestContext<'_>,
    header_key: Option<&str>,
    body: &Value,
) -> Result<(Mode, String), ProxyError> {
    authenticate(context.config, header_key, body)?;

    let mode_raw = body
        .get("mode")
        .and_then(Value::as_str)
        .ok_or_else(|| ProxyError::missing_param("mode"))?;
    let mode = Mode::parse(mode_raw).ok_or_else(|| ProxyError::unknown_mode(mode_raw))?;

    let text = if mode.is_audio() {
        voice::run_audio(context, mode, body).await?
    } else {
        run_text(context, mode, body).await?
    };

    Ok((mode, text))
}

/// Shared-secret check; the header wins over the body field. Runs before
/// anything else so a bad key never reaches the upstream.
fn authenticate(config: &Config, header_key: Option<&str>, body: &Value) -> Result<(), ProxyError> {
    let presented = header_key.or_else(|| body.get("key").and_then(Value::as_str));
    match presented {
        Some(key) if key == config.shared_secret => Ok(()),
        _ => Err(ProxyError::invalid_key()),
    }
}

async fn run_text(
    context: &RequestContext<'_>,
    mode: Mode,
    body: &Value,
) -> Result<String, ProxyError> {
    let text = body
        .get("text")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ProxyError::missing_param("text"))?;

    let target_language = body
        .get("tl")
        .or_else(|| body.get("targetLanguage"))
        .and_then(Value::as_str);

    let tone = match body.get("tone").and_then(Value::as_str) {
        Some(raw) => Tone::parse(raw)
            .ok_or_else(|| ProxyError::bad_request(&format!("unknown tone '{}'", raw)))?,
        None => Tone::default(),
    };

    let resolution = resolve_prompt(mode, target_language, tone, context.config)?;
    let upstream = context.upstream();

    let chunks = split_chunks(text, context.config.chunk_size);
    let merged = if chunks.len() == 1 {
        chat_completion(&upstream, &resolution, chunks[0]).await?
    } else {
        log::debug!(
            "splitting {} chars into {} slices of at most {}",
            text.chars().count(),
            chunks.len(),
            context.config.chunk_size
        );
        let calls: Vec<_> = chunks
            .iter()
            .copied()
            .map(|slice| chat_completion(&upstream, &resolution, slice))
            .collect();
        // buffered, not buffer_unordered: output segments must keep input order
        let segments: Vec<String> = stream::iter(calls)
            .buffered(context.config.chunk_parallelism)
            .try_collect()
            .await?;
        segments.join("\n")
    };

    let cleaned = clean_model_output(&merged);
    Ok(truncate_output(&cleaned, context.config.max_output_chars))
}
