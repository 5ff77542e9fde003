//! # Tests Module
//!
//! Integration tests for the remixer HTTP surface. Each test builds the real
//! router around a controller whose generator, clipboard and share opener are
//! in-memory fakes, then drives it with `tower::ServiceExt::oneshot`.

use crate::{
    controller::{Phase, RemixController},
    handlers::{build_router, handle_health},
    test_support::{
        FailingGenerator, GatedGenerator, RecordingClipboard, RecordingOpener, ScriptedGenerator,
    },
    TextGenerator, GENERIC_FAILURE_MESSAGE,
};
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::{Json, Response},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tower::ServiceExt;

struct TestApp {
    controller: Arc<RemixController>,
    clipboard: Arc<RecordingClipboard>,
    opener: Arc<RecordingOpener>,
}

impl TestApp {
    fn new(generator: Arc<dyn TextGenerator>) -> Self {
        let clipboard = Arc::new(RecordingClipboard::default());
        let opener = Arc::new(RecordingOpener::default());
        let controller = Arc::new(RemixController::new(
            generator,
            clipboard.clone(),
            opener.clone(),
        ));
        Self {
            controller,
            clipboard,
            opener,
        }
    }

    fn router(&self) -> Router {
        build_router(Arc::clone(&self.controller))
    }
}

fn form_request(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(serde_urlencoded::to_string(fields).unwrap()))
        .unwrap()
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap()
}

async fn body_string(response: Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

/// Tests the health endpoint handler function directly.
#[tokio::test]
async fn test_handle_health() {
    let Json(json_response) = handle_health().await;
    assert_eq!(json_response["status"], "healthy");
    assert_eq!(json_response["service"], "remixer");
}

/// Integration test for the health endpoint (GET /health).
#[tokio::test]
async fn test_health_endpoint() {
    let app = TestApp::new(Arc::new(ScriptedGenerator::new("")));

    let response = app.router().oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json_response = body_json(response).await;
    assert_eq!(json_response["status"], "healthy");
}

/// The empty page shows the form and the default tweet-mode button label.
#[tokio::test]
async fn test_root_renders_form() {
    let app = TestApp::new(Arc::new(ScriptedGenerator::new("")));

    let response = app.router().oneshot(get_request("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_string(response).await;
    assert!(page.contains("Content Remixer"));
    assert!(page.contains("Generate Tweet Variations"));
    assert!(!page.contains("Version 1"));
}

/// A form submission redirects back to the page, which then lists the tweets.
#[tokio::test]
async fn test_form_submission_renders_tweets() {
    let generator = Arc::new(ScriptedGenerator::new(
        "Sure!\nTweet 1: Rust is fast\nTweet 2: Rust is safe\nTweet 3: Rust is fun",
    ));
    let app = TestApp::new(generator.clone());

    let response = app
        .router()
        .oneshot(form_request(
            "/remix",
            &[("text", "Rust is great"), ("mode", "tweets")],
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let page = body_string(app.router().oneshot(get_request("/")).await.unwrap()).await;
    assert!(page.contains("Version 3"));
    assert!(!page.contains("Version 4"));
    assert!(page.contains("Rust is safe"));
    assert!(page.contains("12/280 characters"));
    assert!(page.contains(">Rust is great</textarea>"));
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
}

/// Blank input is a no-op: no generator call and no state change.
#[tokio::test]
async fn test_blank_submission_is_ignored() {
    let generator = Arc::new(ScriptedGenerator::new("Tweet 1: unused"));
    let app = TestApp::new(generator.clone());

    let response = app
        .router()
        .oneshot(form_request("/remix", &[("text", "   \n  ")]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);

    let state = app.controller.snapshot().await;
    assert_eq!(state.phase, Phase::Idle);
    assert!(state.result.is_none());
}

/// A failed generation shows only the generic message on the page.
#[tokio::test]
async fn test_generation_failure_shows_generic_error() {
    let app = TestApp::new(Arc::new(FailingGenerator));

    let response = app
        .router()
        .oneshot(form_request("/remix", &[("text", "hello"), ("mode", "single")]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let page = body_string(app.router().oneshot(get_request("/")).await.unwrap()).await;
    assert!(page.contains(GENERIC_FAILURE_MESSAGE));
    assert!(page.contains(">Remix</button>"));
}

/// JSON API returns the formatted single-mode result unchanged.
#[tokio::test]
async fn test_api_remix_single_mode() {
    let app = TestApp::new(Arc::new(ScriptedGenerator::new(
        "  A remixed paragraph.\n",
    )));

    let response = app
        .router()
        .oneshot(json_request(
            "/api/remix",
            serde_json::json!({"text": "a paragraph", "mode": "single"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json_response = body_json(response).await;
    assert_eq!(json_response["status"], "success");
    assert_eq!(json_response["result"]["kind"], "single_text");
    assert_eq!(json_response["result"]["value"], "  A remixed paragraph.\n");
}

/// JSON API maps blank input and generation failures to error statuses.
#[tokio::test]
async fn test_api_remix_errors() {
    let app = TestApp::new(Arc::new(FailingGenerator));

    let response = app
        .router()
        .oneshot(json_request("/api/remix", serde_json::json!({"text": " "})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .router()
        .oneshot(json_request("/api/remix", serde_json::json!({"text": "hi"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json_response = body_json(response).await;
    assert_eq!(json_response["status"], "error");
    assert_eq!(json_response["message"], GENERIC_FAILURE_MESSAGE);

    let state = body_json(app.router().oneshot(get_request("/api/state")).await.unwrap()).await;
    assert_eq!(state["phase"], "failed");
    assert_eq!(state["error"], GENERIC_FAILURE_MESSAGE);
}

/// A second form submission while one is in flight sends the user back to
/// the loading page, while the JSON API reports 409.
#[tokio::test]
async fn test_busy_submission_conflicts() {
    let generator = Arc::new(GatedGenerator::new("Tweet 1: finally"));
    let app = TestApp::new(generator.clone());

    let first = {
        let router = app.router();
        tokio::spawn(async move {
            router
                .oneshot(form_request("/remix", &[("text", "first")]))
                .await
                .unwrap()
        })
    };
    while !app.controller.snapshot().await.is_loading() {
        tokio::task::yield_now().await;
    }

    let page = body_string(app.router().oneshot(get_request("/")).await.unwrap()).await;
    assert!(page.contains("Remixing..."));

    let response = app
        .router()
        .oneshot(form_request("/remix", &[("text", "second")]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let response = app
        .router()
        .oneshot(json_request(
            "/api/remix",
            serde_json::json!({"text": "second"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    generator.release();
    assert_eq!(first.await.unwrap().status(), StatusCode::SEE_OTHER);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    assert_eq!(app.controller.snapshot().await.phase, Phase::Success);
}

/// Copy writes the tweet to the clipboard and the page shows "Copied!".
#[tokio::test]
async fn test_copy_action() {
    let app = TestApp::new(Arc::new(ScriptedGenerator::new(
        "Tweet 1: one\nTweet 2: two",
    )));
    app.controller
        .submit("numbers", crate::RemixMode::MultiTweet)
        .await
        .unwrap();

    let response = app
        .router()
        .oneshot(form_request("/tweets/1/copy", &[]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(app.clipboard.written(), vec!["two".to_string()]);

    let page = body_string(app.router().oneshot(get_request("/")).await.unwrap()).await;
    assert!(page.contains("Copied!"));
}

/// Share opens the intent URL with the tweet text encoded.
#[tokio::test]
async fn test_share_action() {
    let app = TestApp::new(Arc::new(ScriptedGenerator::new("Tweet 1: ship it #rust")));
    app.controller
        .submit("release", crate::RemixMode::MultiTweet)
        .await
        .unwrap();

    let response = app
        .router()
        .oneshot(form_request("/tweets/0/share", &[]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        app.opener.opened(),
        vec!["https://twitter.com/intent/tweet?text=ship%20it%20%23rust".to_string()]
    );
}

/// Actions on tweets that are not displayed return 404.
#[tokio::test]
async fn test_action_on_missing_tweet() {
    let app = TestApp::new(Arc::new(ScriptedGenerator::new("Tweet 1: only one")));

    let response = app
        .router()
        .oneshot(form_request("/tweets/0/copy", &[]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    app.controller
        .submit("text", crate::RemixMode::MultiTweet)
        .await
        .unwrap();
    let response = app
        .router()
        .oneshot(form_request("/tweets/4/share", &[]))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(app.opener.opened().is_empty());
}
