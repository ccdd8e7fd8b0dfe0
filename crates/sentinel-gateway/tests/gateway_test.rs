//! Gateway routes served on an ephemeral port.

use std::io::Read;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use sentinel_core::errors::GatewayError;
use sentinel_engine::queue::ScanJob;
use sentinel_gateway::middleware::rate_limit::RateLimitPolicy;
use sentinel_gateway::{build_router, AppState, HttpRelay, JobSink, Relay};

const TOKEN: &str = "test-token";

#[derive(Default)]
struct RecordingSink {
    jobs: Mutex<Vec<ScanJob>>,
    full: bool,
}

impl JobSink for RecordingSink {
    fn submit(&self, job: ScanJob) -> Result<(), GatewayError> {
        if self.full {
            return Err(GatewayError::QueueUnavailable { reason: "queue full".into() });
        }
        self.jobs.lock().unwrap().push(job);
        Ok(())
    }
}

#[derive(Default)]
struct RecordingRelay {
    sent: Mutex<Vec<String>>,
    fail: bool,
}

#[async_trait]
impl Relay for RecordingRelay {
    async fn relay(&self, html_content: &str) -> Result<(), GatewayError> {
        if self.fail {
            return Err(GatewayError::RelayFailed { reason: "connection refused".into() });
        }
        self.sent.lock().unwrap().push(html_content.to_string());
        Ok(())
    }
}

async fn spawn_gateway(state: AppState) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build_router(state);
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .unwrap();
    });
    format!("http://{addr}")
}

async fn post(base: &str, path: &str, token: Option<&str>, body: Value) -> (u16, String) {
    let mut req = reqwest::Client::new().post(format!("{base}{path}")).json(&body);
    if let Some(t) = token {
        req = req.header("x-auth-token", t);
    }
    let resp = req.send().await.unwrap();
    let status = resp.status().as_u16();
    (status, resp.text().await.unwrap())
}

#[tokio::test]
async fn bad_token_is_forbidden_and_enqueues_nothing() {
    let sink = Arc::new(RecordingSink::default());
    let base = spawn_gateway(AppState::new(TOKEN, sink.clone())).await;

    let (status, body) = post(&base, "/webhook", Some("wrong"), json!({ "url": "http://example.test" })).await;
    assert_eq!(status, 403);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({ "error": "Forbidden: Invalid token" }));

    let (status, _) = post(&base, "/webhook", None, json!({ "url": "http://example.test" })).await;
    assert_eq!(status, 403);
    assert!(sink.jobs.lock().unwrap().is_empty());
}

#[tokio::test]
async fn valid_request_is_acknowledged_and_enqueued() {
    let sink = Arc::new(RecordingSink::default());
    let base = spawn_gateway(AppState::new(TOKEN, sink.clone())).await;

    let (status, body) = post(
        &base,
        "/webhook",
        Some(TOKEN),
        json!({ "url": "http://example.test", "isBaseline": "True " }),
    )
    .await;
    assert_eq!(status, 200);
    let ack: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(ack["message"], "Webhook received successfully");
    assert_eq!(ack["websiteUrl"], "http://example.test");
    assert_eq!(ack["baseline"], "True ");
    assert!(ack["timestamp"].as_str().unwrap().ends_with('Z'));

    let jobs = sink.jobs.lock().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].target, "http://example.test");
    assert!(jobs[0].is_baseline);
}

#[tokio::test]
async fn missing_url_is_bad_request() {
    let sink = Arc::new(RecordingSink::default());
    let base = spawn_gateway(AppState::new(TOKEN, sink.clone())).await;

    let (status, body) = post(&base, "/webhook", Some(TOKEN), json!({ "isBaseline": true })).await;
    assert_eq!(status, 400);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({ "error": "Missing website URL" }));
    assert!(sink.jobs.lock().unwrap().is_empty());
}

#[tokio::test]
async fn option_like_url_is_bad_request() {
    let sink = Arc::new(RecordingSink::default());
    let base = spawn_gateway(AppState::new(TOKEN, sink.clone())).await;

    for url in ["--save=/tmp/out.json", "example.test"] {
        let (status, body) = post(&base, "/webhook", Some(TOKEN), json!({ "url": url })).await;
        assert_eq!(status, 400, "{url}");
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["error"], format!("Invalid website URL: {url}"));
    }
    assert!(sink.jobs.lock().unwrap().is_empty());
}

#[tokio::test]
async fn full_queue_is_service_unavailable() {
    let sink = Arc::new(RecordingSink { full: true, ..Default::default() });
    let base = spawn_gateway(AppState::new(TOKEN, sink)).await;

    let (status, _) = post(&base, "/webhook", Some(TOKEN), json!({ "url": "http://example.test" })).await;
    assert_eq!(status, 503);
}

#[tokio::test]
async fn regression_is_relayed() {
    let relay = Arc::new(RecordingRelay::default());
    let state = AppState::new(TOKEN, Arc::new(RecordingSink::default())).with_relay(relay.clone());
    let base = spawn_gateway(state).await;

    let (status, body) = post(&base, "/regression", Some(TOKEN), json!({ "htmlContent": "<h1>x</h1>" })).await;
    assert_eq!(status, 200);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({ "message": "Regression notification sent" })
    );
    assert_eq!(*relay.sent.lock().unwrap(), vec!["<h1>x</h1>".to_string()]);
}

#[tokio::test]
async fn regression_without_content_is_bad_request() {
    let relay = Arc::new(RecordingRelay::default());
    let state = AppState::new(TOKEN, Arc::new(RecordingSink::default())).with_relay(relay.clone());
    let base = spawn_gateway(state).await;

    let (status, body) = post(&base, "/regression", Some(TOKEN), json!({})).await;
    assert_eq!(status, 400);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({ "error": "Missing HTML content" }));
    assert!(relay.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn relay_failure_is_server_error() {
    let relay = Arc::new(RecordingRelay { fail: true, ..Default::default() });
    let state = AppState::new(TOKEN, Arc::new(RecordingSink::default())).with_relay(relay);
    let base = spawn_gateway(state).await;

    let (status, body) = post(&base, "/regression", Some(TOKEN), json!({ "htmlContent": "<p>x</p>" })).await;
    assert_eq!(status, 500);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({ "error": "Failed to send regression notification" })
    );
}

#[tokio::test]
async fn healthz_needs_no_token() {
    let base = spawn_gateway(AppState::new(TOKEN, Arc::new(RecordingSink::default()))).await;
    let resp = reqwest::get(format!("{base}/healthz")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
}

#[tokio::test]
async fn requests_beyond_limit_are_rejected() {
    let state = AppState::new(TOKEN, Arc::new(RecordingSink::default())).with_rate_limit(RateLimitPolicy {
        max_requests: 2,
        window: Duration::from_secs(60),
    });
    let base = spawn_gateway(state).await;

    for _ in 0..2 {
        let (status, _) = post(&base, "/webhook", Some(TOKEN), json!({ "url": "http://example.test" })).await;
        assert_eq!(status, 200);
    }
    let (status, body) = post(&base, "/webhook", Some(TOKEN), json!({ "url": "http://example.test" })).await;
    assert_eq!(status, 429);
    assert_eq!(body, "Too many requests, please try again later.");
}

#[tokio::test]
async fn http_relay_posts_unauthenticated_payload() {
    let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}/outbound", server.server_addr());
    let capture = std::thread::spawn(move || {
        let mut req = server.recv_timeout(Duration::from_secs(5)).unwrap().unwrap();
        let has_token = req.headers().iter().any(|h| h.field.equiv("x-auth-token"));
        let mut raw = String::new();
        req.as_reader().read_to_string(&mut raw).unwrap();
        let _ = req.respond(tiny_http::Response::from_string("ok"));
        (has_token, raw)
    });

    let relay = HttpRelay::new(endpoint, Duration::from_secs(5)).unwrap();
    relay.relay("<h1>report</h1>").await.unwrap();

    let (has_token, raw) = capture.join().unwrap();
    assert!(!has_token);
    assert_eq!(serde_json::from_str::<Value>(&raw).unwrap(), json!({ "htmlContent": "<h1>report</h1>" }));
}
