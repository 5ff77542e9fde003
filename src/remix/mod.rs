//! Remix request client and response formatting.
//!
//! This module contains the Anthropic Messages API client, the prompts it
//! sends, and the post-processing that turns a raw completion into a
//! [`RemixResult`].

mod api;
mod parsing;
mod prompts;
mod share;
mod types;

// Re-export public API
pub use api::{AnthropicClient, TextGenerator, ANTHROPIC_MESSAGES_URL, MODEL, REQUEST_TIMEOUT};
pub use parsing::{format_response, parse_single, parse_tweets, MAX_TWEETS};
pub use prompts::{build_prompt, Prompt};
pub use share::{build_share_url, CharacterCount, TWEET_CHAR_LIMIT};
pub use types::{RemixMode, RemixRequest, RemixResult};
