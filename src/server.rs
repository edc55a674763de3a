use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use serde_json::{Value, json};
use warp::log::Info as LogInfo;
use warp::{Filter, Rejection, Reply};

use crate::config::Config;
use crate::constants::{
    CODE_INTERNAL_ERROR, CODE_METHOD_NOT_ALLOWED, CODE_MISSING_PARAM, CODE_NOT_FOUND,
    CODE_PAYLOAD_TOO_LARGE, LOG_PREFIX_ERROR, LOG_PREFIX_SUCCESS, LOG_PREFIX_WARNING,
    MAX_JSON_BODY_SIZE_BYTES,
};
use crate::error::ProxyError;
use crate::handlers::{self, RequestContext};
use crate::http::{json_response_with_status, preflight_response};
use crate::logging::format_duration;

/// Stateless proxy server: the only process-wide state is the immutable
/// configuration and the shared HTTP client
pub struct ProxyServer {
    pub client: reqwest::Client,
    pub config: Arc<Config>,
}

impl ProxyServer {
    pub fn new(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        self.print_startup_banner();

        let addr: SocketAddr = self
            .config
            .listen
            .parse()
            .map_err(|e| format!("invalid listen address '{}': {}", self.config.listen, e))?;

        let server_arc = Arc::new(self);

        let log_filter = warp::log::custom(|info: LogInfo| {
            let status_icon = match info.status().as_u16() {
                200..=299 => LOG_PREFIX_SUCCESS,
                400..=499 => LOG_PREFIX_WARNING,
                _ => LOG_PREFIX_ERROR,
            };
            log::info!(
                "{} {} {} | {} | {}",
                status_icon,
                info.method(),
                info.path(),
                info.status(),
                format_duration(info.elapsed())
            );
        });

        let routes = create_routes(server_arc).with(log_filter);

        warp::serve(routes).run(addr).await;
        Ok(())
    }

    fn print_startup_banner(&self) {
        println!();
        println!("MultiLing Proxy - Version: {}", crate::VERSION);
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("📡 Listening on: {}", self.config.listen);
        println!("🔗 Upstream URL: {}", self.config.upstream_url);
        println!("💬 Chat model: {}", self.config.chat_model);
        println!("🎓 Coach model: {}", self.config.coach_model());
        println!("🎙️ Audio model: {}", self.config.audio_model);
        println!(
            "✂️ Chunk size: {} chars (parallelism {})",
            self.config.chunk_size, self.config.chunk_parallelism
        );
        println!("📏 Output limit: {} chars", self.config.max_output_chars);
        println!("🎚️ Audio limit: {} bytes", self.config.max_audio_bytes);
        println!(
            "🕒 Upstream timeout: {}s",
            self.config.request_timeout_seconds
        );
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    }
}

pub fn create_routes(
    server: Arc<ProxyServer>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let with_server_state = warp::any().map(move || server.clone());

    let relay_route = warp::path::end()
        .and(warp::post())
        .and(warp::header::optional::<String>("x-api-key"))
        .and(tolerant_json_body())
        .and(with_server_state.clone())
        .and_then(
            |header_key: Option<String>, body: Value, s: Arc<ProxyServer>| async move {
                let context = RequestContext {
                    client: &s.client,
                    config: s.config.as_ref(),
                };
                Ok::<_, Rejection>(handlers::relay::handle_relay(context, header_key, body).await)
            },
        );

    let health_route = warp::path!("health")
        .and(warp::get())
        .and(with_server_state.clone())
        .map(|s: Arc<ProxyServer>| handlers::health::handle_health(&s.config));

    let preflight_route = warp::options().map(preflight_response);

    relay_route
        .or(health_route)
        .or(preflight_route)
        .recover(handle_rejection)
}

fn tolerant_json_body() -> impl Filter<Extract = (Value,), Error = Rejection> + Clone {
    warp::body::content_length_limit(MAX_JSON_BODY_SIZE_BYTES)
        .and(warp::body::bytes())
        .and_then(|body: Bytes| async move {
            if body.is_empty() {
                return Err(warp::reject::custom(ProxyError::missing_param("body")));
            }
            serde_json::from_slice::<Value>(&body).map_err(|err| {
                warp::reject::custom(ProxyError::bad_request(&format!(
                    "invalid JSON payload: {}",
                    err
                )))
            })
        })
}

/// Folds warp-level rejections into the same envelope the handlers use, so
/// no request ever sees a non-envelope error body
async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status_code, code, message) = if err.is_not_found() {
        (404, CODE_NOT_FOUND, "endpoint not found".to_string())
    } else if let Some(proxy_error) = err.find::<ProxyError>() {
        (
            proxy_error.status_code,
            proxy_error.code(),
            proxy_error.message.clone(),
        )
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (
            413,
            CODE_PAYLOAD_TOO_LARGE,
            "request body too large".to_string(),
        )
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (
            411,
            CODE_MISSING_PARAM,
            "content-length header required".to_string(),
        )
    // checked after the body rejections: the OPTIONS catch-all adds a
    // MethodNotAllowed to every combined rejection on /
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (405, CODE_METHOD_NOT_ALLOWED, "method not allowed".to_string())
    } else {
        log::error!("unhandled rejection: {:?}", err);
        (
            500,
            CODE_INTERNAL_ERROR,
            "an unexpected internal error occurred".to_string(),
        )
    };

    if status_code >= 500 {
        log::error!("{}: {}", code, message);
    } else {
        log::warn!("{}: {}", code, message);
    }

    let envelope = json!({
        "ok": false,
        "mode": Value::Null,
        "text": "",
        "error": code,
        "sid": Value::Null,
    });

    let status = warp::http::StatusCode::from_u16(status_code)
        .unwrap_or(warp::http::StatusCode::INTERNAL_SERVER_ERROR);
    Ok(json_response_with_status(&envelope, status))
}
