//! HTTP route handlers for the remixer service.
//!
//! This module contains the route handlers that render the remix page and
//! forward user actions to the [`RemixController`].

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Json, Redirect},
    routing::{get, post},
    Form, Router,
};
use log::{debug, info};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::controller::{RemixController, RemixState};
use crate::error::{RemixError, GENERIC_FAILURE_MESSAGE};
use crate::remix::{CharacterCount, RemixMode, RemixResult};

/// Shared handle to the session's controller.
pub type AppState = Arc<RemixController>;

/// Body of the HTML form and of `POST /api/remix`.
#[derive(Debug, Deserialize)]
pub struct RemixForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub mode: RemixMode,
}

/// Builds the application router with every route and the shared controller.
///
/// # Routes
///
/// - `GET /`: the remix page
/// - `POST /remix`: form submission, redirects back to `/`
/// - `POST /tweets/:index/copy`: copy one tweet to the clipboard
/// - `POST /tweets/:index/share`: copy one tweet and open its share link
/// - `GET /api/state`: JSON snapshot of the page state
/// - `POST /api/remix`: JSON remix endpoint
/// - `GET /health`: health check
pub fn build_router(controller: AppState) -> Router {
    Router::new()
        .route("/", get(handle_root))
        .route("/remix", post(handle_remix_form))
        .route("/tweets/:index/copy", post(handle_copy))
        .route("/tweets/:index/share", post(handle_share))
        .route("/api/state", get(handle_state))
        .route("/api/remix", post(handle_api_remix))
        .route("/health", get(handle_health))
        .with_state(controller)
}

/// Handles GET requests to the `/health` endpoint.
///
/// # Example Response
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "remixer"
/// }
/// ```
pub async fn handle_health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "remixer"}))
}

/// Handles GET requests to the `/api/state` endpoint.
pub async fn handle_state(State(controller): State<AppState>) -> Json<RemixState> {
    Json(controller.snapshot().await)
}

/// Handles form submissions to `/remix`.
///
/// Every outcome redirects back to `/`. Blank input is a no-op, generation
/// failures are shown on the page, and a second submission while one is in
/// flight lands on the self-refreshing loading page.
pub async fn handle_remix_form(
    State(controller): State<AppState>,
    Form(form): Form<RemixForm>,
) -> Redirect {
    if let Err(e) = controller.submit(&form.text, form.mode).await {
        debug!("Form submission ended with: {}", e);
    }
    Redirect::to("/")
}

/// Handles POST requests to the `/api/remix` endpoint.
///
/// # Success Response
///
/// ```json
/// {
///   "status": "success",
///   "result": { "kind": "tweet_list", "value": ["...", "..."] }
/// }
/// ```
///
/// # Error Response
///
/// ```json
/// {
///   "status": "error",
///   "message": "Failed to remix text. Please try again."
/// }
/// ```
pub async fn handle_api_remix(
    State(controller): State<AppState>,
    Json(form): Json<RemixForm>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match controller.submit(&form.text, form.mode).await {
        Ok(result) => Ok(Json(json!({"status": "success", "result": result}))),
        Err(e) => {
            let message = match e {
                RemixError::GenerationFailure => GENERIC_FAILURE_MESSAGE.to_string(),
                ref other => other.to_string(),
            };
            Err((
                status_for(&e),
                Json(json!({"status": "error", "message": message})),
            ))
        }
    }
}

/// Handles POST requests to `/tweets/:index/copy`.
pub async fn handle_copy(
    State(controller): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Redirect, (StatusCode, String)> {
    match controller.copy(index).await {
        Ok(_) => {
            info!("Copied tweet {}", index + 1);
            Ok(Redirect::to("/"))
        }
        Err(e) => Err((status_for(&e), e.to_string())),
    }
}

/// Handles POST requests to `/tweets/:index/share`.
pub async fn handle_share(
    State(controller): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Redirect, (StatusCode, String)> {
    match controller.share(index).await {
        Ok(_) => Ok(Redirect::to("/")),
        Err(e) => Err((status_for(&e), e.to_string())),
    }
}

fn status_for(error: &RemixError) -> StatusCode {
    match error {
        RemixError::EmptyInput => StatusCode::BAD_REQUEST,
        RemixError::Busy => StatusCode::CONFLICT,
        RemixError::GenerationFailure => StatusCode::BAD_GATEWAY,
        RemixError::NoSuchItem(_) => StatusCode::NOT_FOUND,
    }
}

/// Handles GET requests to the root `/` endpoint.
///
/// Renders the remix page from the current controller state.
pub async fn handle_root(State(controller): State<AppState>) -> Html<String> {
    let state = controller.snapshot().await;
    Html(render_page(&state))
}

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Content Remixer</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif;
            margin: 0;
            padding: 20px;
            background-color: #f3f4f6;
        }
        .container {
            max-width: 900px;
            margin: 0 auto;
        }
        h1 {
            font-size: 3rem;
            text-align: center;
            color: #111;
        }
        textarea {
            width: 100%;
            height: 10rem;
            padding: 12px;
            box-sizing: border-box;
            border: 1px solid #ccc;
            border-radius: 8px;
        }
        .modes {
            margin: 12px 0;
        }
        .error {
            color: #ef4444;
            font-size: 0.9rem;
            margin: 8px 0;
        }
        button.submit {
            width: 100%;
            padding: 10px;
            color: white;
            background-color: #22c55e;
            border: none;
            border-radius: 8px;
        }
        button.submit:disabled {
            background-color: #93c5fd;
            cursor: not-allowed;
        }
        .grid {
            display: grid;
            grid-template-columns: 1fr 1fr;
            gap: 16px;
            margin-top: 24px;
        }
        .card, .single {
            background-color: white;
            padding: 16px;
            border: 1px solid #e5e7eb;
            border-radius: 8px;
            white-space: pre-wrap;
        }
        .card header {
            display: flex;
            justify-content: space-between;
            align-items: flex-start;
        }
        .card form {
            display: inline;
        }
        .count {
            color: #6b7280;
            font-size: 0.9rem;
        }
        .count.over {
            color: #ef4444;
        }
    </style>
"#;

fn render_page(state: &RemixState) -> String {
    let mut html = String::from(PAGE_HEAD);
    if state.is_loading() {
        // Poll until the in-flight request settles
        html.push_str("    <meta http-equiv=\"refresh\" content=\"2\">\n");
    }
    html.push_str("</head>\n<body>\n    <div class=\"container\">\n        <h1>Content Remixer</h1>\n");

    let disabled = if state.is_loading() { " disabled" } else { "" };
    html.push_str(&format!(
        "        <form method=\"post\" action=\"/remix\">\n            <label for=\"text\">Input Text</label>\n            <textarea id=\"text\" name=\"text\" placeholder=\"Enter your text here...\" required{}>{}</textarea>\n",
        disabled,
        html_escape(&state.input)
    ));

    html.push_str("            <div class=\"modes\">\n");
    for (mode, label) in [
        (RemixMode::MultiTweet, "Tweet variations"),
        (RemixMode::Single, "Single remix"),
    ] {
        let checked = if state.mode == mode { " checked" } else { "" };
        html.push_str(&format!(
            "                <label><input type=\"radio\" name=\"mode\" value=\"{}\"{}{}> {}</label>\n",
            mode, checked, disabled, label
        ));
    }
    html.push_str("            </div>\n");

    if let Some(error) = &state.error {
        html.push_str(&format!(
            "            <div class=\"error\">{}</div>\n",
            html_escape(error)
        ));
    }

    let button_label = if state.is_loading() {
        "Remixing..."
    } else {
        match state.mode {
            RemixMode::MultiTweet => "Generate Tweet Variations",
            RemixMode::Single => "Remix",
        }
    };
    html.push_str(&format!(
        "            <button class=\"submit\" type=\"submit\"{}>{}</button>\n        </form>\n",
        disabled, button_label
    ));

    match &state.result {
        Some(RemixResult::SingleText(text)) => {
            html.push_str(&format!(
                "        <p class=\"single\">{}</p>\n",
                html_escape(text)
            ));
        }
        Some(RemixResult::TweetList(tweets)) if tweets.is_empty() => {
            html.push_str("        <p class=\"single\">No tweets were generated.</p>\n");
        }
        Some(RemixResult::TweetList(tweets)) => {
            html.push_str("        <div class=\"grid\">\n");
            for (index, tweet) in tweets.iter().enumerate() {
                html.push_str(&render_tweet_card(index, tweet, state.marked == Some(index)));
            }
            html.push_str("        </div>\n");
        }
        None => {}
    }

    html.push_str("    </div>\n</body>\n</html>");
    html
}

fn render_tweet_card(index: usize, tweet: &str, marked: bool) -> String {
    let count = CharacterCount::of(tweet);
    let count_class = if count.is_over_limit() {
        "count over"
    } else {
        "count"
    };
    let (copy_label, share_label) = if marked {
        ("Copied!", "Copied!")
    } else {
        ("Copy", "Share")
    };

    format!(
        "            <div class=\"card\">\n                <header>\n                    <strong>Version {}</strong>\n                    <span>\n                        <form method=\"post\" action=\"/tweets/{}/copy\"><button type=\"submit\">{}</button></form>\n                        <form method=\"post\" action=\"/tweets/{}/share\"><button type=\"submit\">{}</button></form>\n                    </span>\n                </header>\n                <p>{}</p>\n                <div class=\"{}\">{}</div>\n            </div>\n",
        index + 1,
        index,
        copy_label,
        index,
        share_label,
        html_escape(tweet),
        count_class,
        count
    )
}

/// Escapes HTML special characters to prevent XSS attacks.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
