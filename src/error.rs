//! Error types shared by the remix client, the controller and the HTTP layer.

use thiserror::Error;

/// User-facing message for any failed generation call.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to remix text. Please try again.";

/// Errors surfaced by remix operations.
///
/// Upstream causes never appear here: the client logs them and collapses
/// them into [`RemixError::GenerationFailure`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemixError {
    /// The submitted text was blank after trimming.
    #[error("input text is empty")]
    EmptyInput,
    /// A remix request is already in flight.
    #[error("a remix request is already in progress")]
    Busy,
    /// The upstream model call failed for any reason.
    #[error("failed to remix text")]
    GenerationFailure,
    /// A per-item action referenced a tweet that is not displayed.
    #[error("no tweet at index {0}")]
    NoSuchItem(usize),
}

/// Failures of host side effects (clipboard writes, opening links).
///
/// These are logged by the controller and never shown to the user.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("failed to write to clipboard: {0}")]
    Write(String),
    #[error("failed to open share link: {0}")]
    Open(#[from] std::io::Error),
}
