//! Prompt text sent to the model for each remix mode.

use super::types::RemixMode;

const SINGLE_SYSTEM_PROMPT: &str =
    "You are a creative assistant that helps remix and transform text in interesting ways.";

const TWEETS_SYSTEM_PROMPT: &str = "You are a creative social media assistant that turns text into tweets. \
Always reply with exactly four distinct variations, each short enough to post on Twitter (at most 280 characters). \
Put each variation on its own line and start it with its position as \"Tweet 1:\", \"Tweet 2:\", \"Tweet 3:\" and \"Tweet 4:\". \
Do not add any other commentary.";

/// A system instruction plus the single user turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: &'static str,
    pub user: String,
}

/// Builds the prompt for `text` in the given mode.
pub fn build_prompt(text: &str, mode: RemixMode) -> Prompt {
    match mode {
        RemixMode::Single => Prompt {
            system: SINGLE_SYSTEM_PROMPT,
            user: format!(
                "Please remix the following text in a creative and interesting way:\n\n{}",
                text
            ),
        },
        RemixMode::MultiTweet => Prompt {
            system: TWEETS_SYSTEM_PROMPT,
            user: format!(
                "Create four distinct tweet variations of the following text:\n\n{}",
                text
            ),
        },
    }
}
