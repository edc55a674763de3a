use std::convert::Infallible;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};
use warp::Filter;

use crate::config::Config;
use crate::constants::MAX_JSON_BODY_SIZE_BYTES;
use crate::server::{ProxyServer, create_routes};
use crate::tests::test_config;

fn routes_for(
    config: Config,
) -> impl Filter<Extract = (impl warp::Reply,), Error = Infallible> + Clone {
    let server = ProxyServer::new(config).expect("client builds");
    create_routes(Arc::new(server))
}

fn test_routes() -> impl Filter<Extract = (impl warp::Reply,), Error = Infallible> + Clone {
    routes_for(test_config())
}

/// Spawns a fake chat-completions upstream that echoes each user message
/// back as the completion and counts calls
async fn spawn_echo_upstream(calls: Arc<AtomicUsize>) -> std::net::SocketAddr {
    let mock = warp::path!("chat" / "completions")
        .and(warp::post())
        .and(warp::body::json())
        .map(move |body: Value| {
            calls.fetch_add(1, Ordering::SeqCst);
            let echo = body["messages"][1]["content"]
                .as_str()
                .unwrap_or_default()
                .to_string();
            warp::reply::json(&json!({
                "choices": [{"message": {"content": echo}}]
            }))
        });
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
        .await
        .expect("ephemeral port binds");
    let addr = listener.local_addr().expect("listener has local addr");
    tokio::spawn(warp::serve(mock).incoming(listener).run());
    addr
}

fn body_json(response: &warp::http::Response<bytes::Bytes>) -> Value {
    serde_json::from_slice(response.body()).expect("envelope is JSON")
}

#[tokio::test]
async fn wrong_secret_is_rejected_before_upstream() {
    let routes = test_routes();
    // upstream in test_config is unreachable; a 401 here proves the call
    // never left the proxy
    let response = warp::test::request()
        .method("POST")
        .path("/")
        .json(&json!({"mode": "chat", "text": "hi", "key": "wrong", "sid": "s1"}))
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 401);
    let body = body_json(&response);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "InvalidKey");
    assert_eq!(body["sid"], "s1");
}

#[tokio::test]
async fn missing_secret_is_rejected() {
    let routes = test_routes();
    let response = warp::test::request()
        .method("POST")
        .path("/")
        .json(&json!({"mode": "chat", "text": "hi"}))
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 401);
    assert_eq!(body_json(&response)["error"], "InvalidKey");
}

#[tokio::test]
async fn header_secret_authenticates_and_upstream_failure_is_classified() {
    let routes = test_routes();
    let response = warp::test::request()
        .method("POST")
        .path("/")
        .header("x-api-key", "sekret")
        .json(&json!({"mode": "chat", "text": "hello"}))
        .reply(&routes)
        .await;

    // authentication passed; the closed upstream port maps to UpstreamError
    assert_eq!(response.status(), 502);
    let body = body_json(&response);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "UpstreamError");
    assert_eq!(body["mode"], "chat");
}

#[tokio::test]
async fn missing_mode_is_missing_param() {
    let routes = test_routes();
    let response = warp::test::request()
        .method("POST")
        .path("/")
        .json(&json!({"text": "hi", "key": "sekret"}))
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 400);
    assert_eq!(body_json(&response)["error"], "MissingParam");
}

#[tokio::test]
async fn unknown_mode_is_terminal() {
    let routes = test_routes();
    let response = warp::test::request()
        .method("POST")
        .path("/")
        .json(&json!({"mode": "banana", "text": "hi", "key": "sekret"}))
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 400);
    let body = body_json(&response);
    assert_eq!(body["error"], "UnknownMode");
    assert_eq!(body["mode"], "banana");
}

#[tokio::test]
async fn fix_without_target_language_is_rejected() {
    let routes = test_routes();
    let response = warp::test::request()
        .method("POST")
        .path("/")
        .json(&json!({"mode": "fix", "text": "bonjour", "tone": "A1", "key": "sekret"}))
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 400);
    assert_eq!(body_json(&response)["error"], "MissingParam");
}

#[tokio::test]
async fn unknown_tone_is_rejected() {
    let routes = test_routes();
    let response = warp::test::request()
        .method("POST")
        .path("/")
        .json(&json!({"mode": "fix", "text": "hola", "tl": "en", "tone": "Z9", "key": "sekret"}))
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 400);
    assert_eq!(body_json(&response)["error"], "MissingParam");
}

#[tokio::test]
async fn empty_text_is_missing_param() {
    let routes = test_routes();
    let response = warp::test::request()
        .method("POST")
        .path("/")
        .json(&json!({"mode": "chat", "text": "   ", "key": "sekret"}))
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 400);
    assert_eq!(body_json(&response)["error"], "MissingParam");
}

#[tokio::test]
async fn malformed_json_yields_envelope_not_fault() {
    let routes = test_routes();
    let response = warp::test::request()
        .method("POST")
        .path("/")
        .body("{not json")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 400);
    let body = body_json(&response);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "MissingParam");
}

#[tokio::test]
async fn oversized_json_body_is_rejected_with_envelope() {
    let routes = test_routes();
    // one byte over the inbound body limit; the content-length gate rejects
    // it before the body is read
    let oversized = "x".repeat(MAX_JSON_BODY_SIZE_BYTES as usize + 1);
    let response = warp::test::request()
        .method("POST")
        .path("/")
        .body(oversized)
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 413);
    let body = body_json(&response);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "PayloadTooLarge");
}

#[tokio::test]
async fn post_without_content_length_is_a_validation_error() {
    let routes = test_routes();
    let response = warp::test::request()
        .method("POST")
        .path("/")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 411);
    let body = body_json(&response);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "MissingParam");
}

#[tokio::test]
async fn non_post_root_is_method_not_allowed() {
    let routes = test_routes();
    let response = warp::test::request()
        .method("GET")
        .path("/")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 405);
    assert_eq!(body_json(&response)["error"], "MethodNotAllowed");
}

#[tokio::test]
async fn oversized_audio_is_rejected_before_decoding() {
    let routes = test_routes();
    // ~3000 decoded bytes against the 1024-byte test limit
    let audio = "A".repeat(4000);
    let response = warp::test::request()
        .method("POST")
        .path("/")
        .json(&json!({"mode": "transcribe", "audioBase64": audio, "key": "sekret"}))
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 413);
    let body = body_json(&response);
    assert_eq!(body["error"], "PayloadTooLarge");
    assert_eq!(body["mode"], "transcribe");
}

#[tokio::test]
async fn undecodable_audio_is_a_validation_error() {
    let routes = test_routes();
    let response = warp::test::request()
        .method("POST")
        .path("/")
        .json(&json!({"mode": "transcribe", "audioBase64": "!!!!", "key": "sekret"}))
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 400);
    assert_eq!(body_json(&response)["error"], "MissingParam");
}

#[tokio::test]
async fn missing_audio_is_missing_param() {
    let routes = test_routes();
    let response = warp::test::request()
        .method("POST")
        .path("/")
        .json(&json!({"mode": "translate", "key": "sekret"}))
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 400);
    assert_eq!(body_json(&response)["error"], "MissingParam");
}

#[tokio::test]
async fn short_text_makes_exactly_one_upstream_call() {
    let calls = Arc::new(AtomicUsize::new(0));
    let addr = spawn_echo_upstream(calls.clone()).await;

    let mut config = test_config();
    config.upstream_url = format!("http://{}", addr);
    let routes = routes_for(config);

    let response = warp::test::request()
        .method("POST")
        .path("/")
        .json(&json!({"mode": "chat", "text": "Hello", "key": "sekret"}))
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 200);
    let body = body_json(&response);
    assert_eq!(body["ok"], true);
    assert_eq!(body["mode"], "chat");
    assert_eq!(body["text"], "Hello");
    assert_eq!(body["error"], Value::Null);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn long_text_is_chunked_and_reassembled_in_order() {
    let calls = Arc::new(AtomicUsize::new(0));
    let addr = spawn_echo_upstream(calls.clone()).await;

    let mut config = test_config();
    config.upstream_url = format!("http://{}", addr);
    let routes = routes_for(config);

    // 2500 chars against an 1800-char chunk size: two slices, and the echo
    // upstream makes segment order observable
    let text = format!("{}{}", "x".repeat(1800), "y".repeat(700));
    let response = warp::test::request()
        .method("POST")
        .path("/")
        .json(&json!({"mode": "fix", "text": text, "tl": "en", "tone": "A1", "key": "sekret"}))
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 200);
    let body = body_json(&response);
    assert_eq!(body["ok"], true);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(
        body["text"],
        format!("{}\n{}", "x".repeat(1800), "y".repeat(700))
    );
}

#[tokio::test]
async fn upstream_401_is_reported_as_upstream_error() {
    let mock = warp::path!("chat" / "completions").and(warp::post()).map(|| {
        warp::reply::with_status(
            warp::reply::json(&json!({"error": {"message": "bad api key"}})),
            warp::http::StatusCode::UNAUTHORIZED,
        )
    });
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
        .await
        .expect("ephemeral port binds");
    let addr = listener.local_addr().expect("listener has local addr");
    tokio::spawn(warp::serve(mock).incoming(listener).run());

    let mut config = test_config();
    config.upstream_url = format!("http://{}", addr);
    let routes = routes_for(config);

    let response = warp::test::request()
        .method("POST")
        .path("/")
        .json(&json!({"mode": "chat", "text": "hi", "key": "sekret"}))
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 502);
    assert_eq!(body_json(&response)["error"], "UpstreamError");
}

#[tokio::test]
async fn slow_upstream_times_out_with_distinct_code() {
    let mock = warp::path!("chat" / "completions")
        .and(warp::post())
        .and_then(|| async {
            tokio::time::sleep(std::time::Duration::from_secs(3)).await;
            Ok::<_, warp::Rejection>(warp::reply::json(
                &json!({"choices": [{"message": {"content": "late"}}]}),
            ))
        });
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
        .await
        .expect("ephemeral port binds");
    let addr = listener.local_addr().expect("listener has local addr");
    tokio::spawn(warp::serve(mock).incoming(listener).run());

    let mut config = test_config();
    config.upstream_url = format!("http://{}", addr);
    config.request_timeout_seconds = 1;
    let routes = routes_for(config);

    let response = warp::test::request()
        .method("POST")
        .path("/")
        .json(&json!({"mode": "chat", "text": "hi", "key": "sekret"}))
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 504);
    assert_eq!(body_json(&response)["error"], "UpstreamTimeout");
}

#[tokio::test]
async fn health_probe_reports_configuration() {
    let routes = test_routes();
    let response = warp::test::request()
        .method("GET")
        .path("/health")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 200);
    let body = body_json(&response);
    assert_eq!(body["ok"], true);
    assert_eq!(body["service"], "multiling-proxy");
    assert_eq!(body["chunk_size"], 1800);
}

#[tokio::test]
async fn preflight_gets_cors_headers() {
    let routes = test_routes();
    let response = warp::test::request()
        .method("OPTIONS")
        .path("/")
        .reply(&routes)
        .await;

    assert_eq!(response.status(), 204);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
