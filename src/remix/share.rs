//! Share-intent links and the tweet length indicator.

use std::fmt;

/// Display-only tweet length limit.
pub const TWEET_CHAR_LIMIT: usize = 280;

/// Base URL of the Twitter web intent for composing a tweet.
pub const SHARE_INTENT_URL: &str = "https://twitter.com/intent/tweet";

/// Builds a share-intent URL with `text` URL-encoded as the `text` query parameter.
///
/// # Example
///
/// ```rust
/// use remixer::build_share_url;
///
/// assert_eq!(
///     build_share_url("hello world"),
///     "https://twitter.com/intent/tweet?text=hello%20world"
/// );
/// ```
pub fn build_share_url(text: &str) -> String {
    format!("{}?text={}", SHARE_INTENT_URL, urlencoding::encode(text))
}

/// Character count of one tweet against [`TWEET_CHAR_LIMIT`].
///
/// Nothing is truncated; callers only use this to render the "n/280" indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterCount {
    pub count: usize,
    pub limit: usize,
}

impl CharacterCount {
    pub fn of(text: &str) -> Self {
        Self {
            count: text.chars().count(),
            limit: TWEET_CHAR_LIMIT,
        }
    }

    pub fn is_over_limit(&self) -> bool {
        self.count > self.limit
    }
}

impl fmt::Display for CharacterCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} characters", self.count, self.limit)
    }
}
