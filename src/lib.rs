//! # Remixer Library
//!
//! A small local web service that takes user-entered text, sends it to the
//! Anthropic Messages API, and shows the returned variations: either a single
//! remixed paragraph or up to four tweet-length variants with copy and share
//! actions.
//!
//! ## Features
//!
//! - Server-rendered remix page with a JSON API alongside it
//! - Anthropic Messages API client behind a `TextGenerator` trait
//! - Parsing of labeled "Tweet N:" responses into at most four variants
//! - Host clipboard and share-link integration for each variant
//! - Structured logging
//!
//! ## Configuration
//!
//! - `ANTHROPIC_API_KEY`: API key for the Messages API (`CLAUDE_API_KEY` is accepted too)
//! - `PORT`: Server port (defaults to 3000)
//!
//! ## API Endpoints
//!
//! - `GET /`: The remix page
//! - `POST /remix`: Form submission
//! - `POST /tweets/:index/copy` and `POST /tweets/:index/share`: Per-tweet actions
//! - `GET /api/state`, `POST /api/remix`: JSON API
//! - `GET /health`: Returns service health status

pub mod clipboard;
pub mod config;
pub mod controller;
pub mod error;
pub mod handlers;
pub mod remix;

// Re-export commonly used types and functions
pub use clipboard::{BrowserOpener, ClipboardWriter, LinkOpener, SystemClipboard};
pub use config::{get_server_port, ConfigError, RemixerConfig};
pub use controller::{Phase, RemixController, RemixState, MARK_DURATION};
pub use error::{ClipboardError, RemixError, GENERIC_FAILURE_MESSAGE};
pub use handlers::build_router;
pub use remix::{
    build_share_url, format_response, parse_single, parse_tweets, AnthropicClient,
    CharacterCount, RemixMode, RemixRequest, RemixResult, TextGenerator,
};

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod tests;
