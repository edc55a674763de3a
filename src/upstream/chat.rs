use crate::constants::UPSTREAM_CHAT_COMPLETIONS;
use crate::error::ProxyError;
use crate::http::send_with_deadline;
use crate::prompt::PromptResolution;
use crate::upstream::types::{ChatMessage, ChatRequest, ChatResponse};
use crate::upstream::{UpstreamClient, reject_error_status};

/// Sends one chat-completion call with the resolved system prompt and
/// returns the first choice's content, trimmed.
pub async fn chat_completion(
    upstream: &UpstreamClient<'_>,
    resolution: &PromptResolution,
    user_text: &str,
) -> Result<String, ProxyError> {
    let request = ChatRequest {
        model: resolution.model.clone(),
        temperature: resolution.temperature,
        messages: vec![
            ChatMessage {
                role: "system",
                content: resolution.system_prompt.clone(),
            },
            ChatMessage {
                role: "user",
                content: user_text.to_string(),
            },
        ],
    };

    let url = upstream.endpoint_url(UPSTREAM_CHAT_COMPLETIONS);
    let builder = upstream
        .client
        .post(&url)
        .bearer_auth(upstream.api_key)
        .json(&request);

    let response = send_with_deadline(builder, upstream.timeout).await?;
    let response = reject_error_status(response).await?;

    let parsed: ChatResponse = response
        .json()
        .await
        .map_err(|e| ProxyError::internal(&format!("invalid JSON from upstream: {}", e)))?;

    let content = parsed
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| ProxyError::upstream_error(502, "no completion choices returned"))?;

    Ok(content.trim().to_string())
}
