//! Request and result types for a single remix submission.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RemixError;

/// Which generation behavior a submission asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemixMode {
    /// One free-form remixed paragraph.
    Single,
    /// Up to four tweet-length variants.
    #[default]
    #[serde(rename = "tweets")]
    MultiTweet,
}

impl RemixMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemixMode::Single => "single",
            RemixMode::MultiTweet => "tweets",
        }
    }
}

impl fmt::Display for RemixMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RemixMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" | "remix" => Ok(RemixMode::Single),
            "tweets" | "tweet" | "multi" => Ok(RemixMode::MultiTweet),
            other => Err(format!("unknown remix mode '{}'", other)),
        }
    }
}

/// A validated submission. Construct with [`RemixRequest::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemixRequest {
    text: String,
    mode: RemixMode,
}

impl RemixRequest {
    /// Rejects text that is blank after trimming. The stored text is left as entered.
    pub fn new(text: impl Into<String>, mode: RemixMode) -> Result<Self, RemixError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(RemixError::EmptyInput);
        }
        Ok(Self { text, mode })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> RemixMode {
        self.mode
    }
}

/// The formatted outcome of a successful remix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RemixResult {
    SingleText(String),
    TweetList(Vec<String>),
}

impl RemixResult {
    /// Returns the tweets when this is a tweet list.
    pub fn tweets(&self) -> Option<&[String]> {
        match self {
            RemixResult::TweetList(tweets) => Some(tweets),
            RemixResult::SingleText(_) => None,
        }
    }
}
