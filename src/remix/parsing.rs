//! Formatting of raw model responses.
//!
//! Tweet mode responses carry positional labels ("Tweet 1:", "Tweet 2:", ...)
//! that delimit one variant from the next.

use log::{debug, error};

use super::types::{RemixMode, RemixResult};

/// Upper bound on the number of tweets kept from one response.
pub const MAX_TWEETS: usize = 4;

/// Splits a labeled response into at most [`MAX_TWEETS`] trimmed, non-empty segments.
///
/// Text before the first label is discarded. Responses with fewer labels yield
/// fewer entries; responses without labels yield an empty list.
///
/// # Example
///
/// ```rust
/// use remixer::parse_tweets;
///
/// let tweets = parse_tweets("Tweet 1: A\nTweet 2: B");
/// assert_eq!(tweets, vec!["A".to_string(), "B".to_string()]);
/// ```
pub fn parse_tweets(raw: &str) -> Vec<String> {
    let re = match regex::Regex::new(r"Tweet \d+:") {
        Ok(re) => re,
        Err(e) => {
            error!("Failed to compile tweet label pattern: {}", e);
            return Vec::new();
        }
    };

    let tweets: Vec<String> = re
        .split(raw)
        .skip(1)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .take(MAX_TWEETS)
        .map(str::to_string)
        .collect();

    debug!(
        "Parsed {} tweet(s) from {} byte response",
        tweets.len(),
        raw.len()
    );
    tweets
}

/// Single mode formatting: the response is returned unmodified.
pub fn parse_single(raw: &str) -> String {
    raw.to_string()
}

/// Formats a raw response according to the mode it was requested with.
pub fn format_response(raw: &str, mode: RemixMode) -> RemixResult {
    match mode {
        RemixMode::Single => RemixResult::SingleText(parse_single(raw)),
        RemixMode::MultiTweet => RemixResult::TweetList(parse_tweets(raw)),
    }
}
