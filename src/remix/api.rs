//! Anthropic Messages API client.
//!
//! This module contains the request client that sends one prompt to the
//! text-generation endpoint and returns the raw completion text.

use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::RemixerConfig;
use crate::error::RemixError;

use super::prompts::{build_prompt, Prompt};
use super::types::RemixMode;

pub const ANTHROPIC_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const MODEL: &str = "claude-3-5-sonnet-20241022";
pub const MAX_TOKENS: u32 = 1000;
pub const TEMPERATURE: f32 = 0.7;

/// Upper bound on one Messages call, from connect to the last body byte.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A source of raw completion text for a remix submission.
///
/// The controller only depends on this trait, so tests can drive it with a
/// scripted generator instead of the network client.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates raw response text for non-blank `text` in `mode`.
    ///
    /// Any failure is reported as [`RemixError::GenerationFailure`].
    async fn generate(&self, text: &str, mode: RemixMode) -> Result<String, RemixError>;
}

/// Sanitizes text for safe logging by truncating and escaping control characters.
///
/// Newlines, carriage returns and tabs become spaces, other control characters
/// become `?`, and output longer than `max_chars` characters is cut short.
pub(crate) fn sanitize_for_logging(text: &str, max_chars: usize) -> String {
    let sanitized: String = text
        .chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            c if c.is_control() => '?',
            c => c,
        })
        .collect();

    if sanitized.chars().count() > max_chars {
        let truncated: String = sanitized.chars().take(max_chars).collect();
        format!(
            "{}... [truncated, {} total bytes]",
            truncated,
            text.len()
        )
    } else {
        sanitized
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

/// Extracts the text of the first content block from a Messages API response body.
///
/// An empty content list or a first block that is not text is an error.
fn extract_first_text(body: &str) -> Result<String, BoxError> {
    let response: MessagesResponse = serde_json::from_str(body)?;
    match response.content.into_iter().next() {
        Some(ContentBlock::Text { text }) => Ok(text),
        Some(ContentBlock::Other) => Err("first content block is not text".into()),
        None => Err("response contained no content blocks".into()),
    }
}

/// HTTP client for the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: Client,
    config: RemixerConfig,
    endpoint: String,
}

impl AnthropicClient {
    /// Creates a client that talks to the public Messages endpoint.
    ///
    /// Calls that take longer than [`REQUEST_TIMEOUT`] fail, so a stalled
    /// upstream cannot hold the session in its loading state.
    pub fn new(config: RemixerConfig) -> Result<Self, reqwest::Error> {
        Self::with_timeout(config, REQUEST_TIMEOUT)
    }

    /// Creates a client whose calls give up after `timeout`.
    pub fn with_timeout(
        config: RemixerConfig,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            config,
            endpoint: ANTHROPIC_MESSAGES_URL.to_string(),
        })
    }

    /// Points the client at a different Messages endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sends one prompt and returns the first text block of the completion.
    ///
    /// # Errors
    ///
    /// Returns the underlying cause for transport errors, non-success statuses,
    /// undecodable bodies and non-text responses.
    async fn request_completion(&self, prompt: &Prompt) -> Result<String, BoxError> {
        let payload = MessagesRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            system: prompt.system,
            messages: vec![Message {
                role: "user",
                content: &prompt.user,
            }],
        };
        debug!(
            "Messages payload: model={}, max_tokens={}, prompt={} bytes",
            MODEL,
            MAX_TOKENS,
            prompt.user.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        info!("Received response with status: {} from Messages API", status);

        let body = response.text().await?;
        if !status.is_success() {
            debug!(
                "Error response from Messages API: {}",
                sanitize_for_logging(&body, 200)
            );
            return Err(format!("Anthropic API error ({})", status).into());
        }

        debug!("Response summary: {} bytes received", body.len());
        extract_first_text(&body)
    }
}

#[async_trait]
impl TextGenerator for AnthropicClient {
    async fn generate(&self, text: &str, mode: RemixMode) -> Result<String, RemixError> {
        info!(
            "Starting remix in {} mode for {} characters of input",
            mode,
            text.chars().count()
        );

        let prompt = build_prompt(text, mode);
        match self.request_completion(&prompt).await {
            Ok(completion) => {
                info!("Remix completed: {} bytes of output", completion.len());
                Ok(completion)
            }
            Err(e) => {
                error!(
                    "Error calling Anthropic API: {}",
                    sanitize_for_logging(&e.to_string(), 300)
                );
                Err(RemixError::GenerationFailure)
            }
        }
    }
}
