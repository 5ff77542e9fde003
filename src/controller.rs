//! Interaction controller for the remix page.
//!
//! The controller owns one [`RemixState`] per UI session. Every user event is
//! applied as a transition that produces a new state value; the previous value
//! is never mutated in place.
//!
//! ```text
//! Idle ──submit──▶ Loading ──ok──▶ Success ─┐
//!                     │                      ├──submit──▶ Loading ...
//!                     └──err──▶ Failed ──────┘
//! ```
//!
//! Copy and share actions mark one tweet for a fixed window and are independent
//! of the submission state machine.

use log::{debug, error, info, warn};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinSet;

use crate::clipboard::{ClipboardWriter, LinkOpener};
use crate::error::{ClipboardError, RemixError, GENERIC_FAILURE_MESSAGE};
use crate::remix::{
    build_share_url, format_response, RemixMode, RemixRequest, RemixResult, TextGenerator,
};

/// How long a copied or shared tweet stays marked.
pub const MARK_DURATION: Duration = Duration::from_secs(2);

/// Where the current submission is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

/// Snapshot of everything the page renders.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RemixState {
    pub input: String,
    pub mode: RemixMode,
    pub phase: Phase,
    pub result: Option<RemixResult>,
    pub error: Option<String>,
    pub marked: Option<usize>,
}

impl RemixState {
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// `Idle -> Loading`. Clears any previous error.
    ///
    /// Blank input yields [`RemixError::EmptyInput`] and an in-flight request
    /// yields [`RemixError::Busy`]; in both cases the state is left as it was.
    pub fn begin(
        &self,
        input: &str,
        mode: RemixMode,
    ) -> Result<(Self, RemixRequest), RemixError> {
        if self.is_loading() {
            return Err(RemixError::Busy);
        }
        let request = RemixRequest::new(input, mode)?;
        let next = Self {
            input: input.to_string(),
            mode,
            phase: Phase::Loading,
            error: None,
            ..self.clone()
        };
        Ok((next, request))
    }

    /// `Loading -> Success`. Replaces the result and drops any stale marker.
    pub fn succeed(&self, result: RemixResult) -> Self {
        Self {
            phase: Phase::Success,
            result: Some(result),
            error: None,
            marked: None,
            ..self.clone()
        }
    }

    /// `Loading -> Failed`. The previous result stays on screen.
    pub fn fail(&self) -> Self {
        Self {
            phase: Phase::Failed,
            error: Some(GENERIC_FAILURE_MESSAGE.to_string()),
            ..self.clone()
        }
    }

    /// Returns the displayed tweet at `index`.
    pub fn tweet(&self, index: usize) -> Result<&str, RemixError> {
        self.result
            .as_ref()
            .and_then(RemixResult::tweets)
            .and_then(|tweets| tweets.get(index))
            .map(String::as_str)
            .ok_or(RemixError::NoSuchItem(index))
    }

    /// `Unmarked -> Marked` for the tweet at `index`.
    ///
    /// Returns `None` unless the tweet at `index` still reads `text`, so a
    /// result that was replaced after the user acted is never marked.
    pub fn mark(&self, index: usize, text: &str) -> Option<Self> {
        match self.tweet(index) {
            Ok(current) if current == text => Some(Self {
                marked: Some(index),
                ..self.clone()
            }),
            _ => None,
        }
    }

    /// `Marked -> Unmarked`. Leaves a different marked tweet alone.
    pub fn unmark(&self, index: usize) -> Self {
        if self.marked == Some(index) {
            Self {
                marked: None,
                ..self.clone()
            }
        } else {
            self.clone()
        }
    }
}

/// Drives submissions and per-tweet actions for one UI session.
///
/// Dropping the controller aborts any pending unmark timers.
pub struct RemixController {
    generator: Arc<dyn TextGenerator>,
    clipboard: Arc<dyn ClipboardWriter>,
    opener: Arc<dyn LinkOpener>,
    state: Arc<Mutex<RemixState>>,
    timers: Mutex<JoinSet<()>>,
    mark_duration: Duration,
}

impl RemixController {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        clipboard: Arc<dyn ClipboardWriter>,
        opener: Arc<dyn LinkOpener>,
    ) -> Self {
        Self {
            generator,
            clipboard,
            opener,
            state: Arc::new(Mutex::new(RemixState::default())),
            timers: Mutex::new(JoinSet::new()),
            mark_duration: MARK_DURATION,
        }
    }

    /// Returns a copy of the current state.
    pub async fn snapshot(&self) -> RemixState {
        self.state.lock().await.clone()
    }

    /// Submits `input` for remixing and waits for the outcome.
    ///
    /// The generation call runs on its own task, so it always completes and
    /// clears the loading state even if the caller stops waiting.
    ///
    /// # Errors
    ///
    /// - [`RemixError::EmptyInput`]: `input` is blank; nothing is sent
    /// - [`RemixError::Busy`]: another submission is in flight; nothing is sent
    /// - [`RemixError::GenerationFailure`]: the upstream call failed
    pub async fn submit(&self, input: &str, mode: RemixMode) -> Result<RemixResult, RemixError> {
        let request = {
            let mut state = self.state.lock().await;
            match state.begin(input, mode) {
                Ok((next, request)) => {
                    *state = next;
                    request
                }
                Err(RemixError::EmptyInput) => {
                    debug!("Ignoring submission with blank input");
                    return Err(RemixError::EmptyInput);
                }
                Err(e) => {
                    warn!("Rejecting submission: {}", e);
                    return Err(e);
                }
            }
        };
        info!("Submitting remix request in {} mode", request.mode());

        let generator = Arc::clone(&self.generator);
        let state = Arc::clone(&self.state);
        let task = tokio::spawn(async move {
            let outcome = generator
                .generate(request.text(), request.mode())
                .await
                .map(|raw| format_response(&raw, request.mode()));

            let mut guard = state.lock().await;
            let next = match &outcome {
                Ok(result) => guard.succeed(result.clone()),
                Err(_) => guard.fail(),
            };
            *guard = next;
            outcome
        });

        match task.await {
            Ok(Ok(result)) => {
                info!("Remix succeeded");
                Ok(result)
            }
            Ok(Err(e)) => {
                warn!("Remix failed: {}", e);
                Err(e)
            }
            Err(e) => {
                error!("Remix task did not complete: {}", e);
                let mut guard = self.state.lock().await;
                let next = guard.fail();
                *guard = next;
                Err(RemixError::GenerationFailure)
            }
        }
    }

    /// Copies the tweet at `index` to the clipboard and marks it.
    ///
    /// A clipboard failure is logged and leaves the tweet unmarked. If the
    /// results change while the clipboard is written, nothing is marked.
    pub async fn copy(&self, index: usize) -> Result<String, RemixError> {
        let text = self.snapshot().await.tweet(index)?.to_string();

        match self.write_clipboard(&text).await {
            Ok(()) => self.mark(index, &text).await,
            Err(e) => error!("Failed to copy tweet: {}", e),
        }
        Ok(text)
    }

    /// Copies the tweet at `index`, marks it, and opens its share link.
    ///
    /// Returns the share URL. Clipboard and browser failures are logged only;
    /// the link is opened even when the clipboard write fails.
    pub async fn share(&self, index: usize) -> Result<String, RemixError> {
        let text = self.snapshot().await.tweet(index)?.to_string();
        self.mark(index, &text).await;

        if let Err(e) = self.write_clipboard(&text).await {
            error!("Failed to copy tweet: {}", e);
        }

        let url = build_share_url(&text);
        let opener = Arc::clone(&self.opener);
        let target = url.clone();
        match tokio::task::spawn_blocking(move || opener.open_link(&target)).await {
            Ok(Ok(())) => info!("Opened share link for tweet {}", index + 1),
            Ok(Err(e)) => error!("Failed to open share link: {}", e),
            Err(e) => error!("Share link task did not complete: {}", e),
        }
        Ok(url)
    }

    /// Aborts pending unmark timers.
    pub async fn shutdown(&self) {
        let mut timers = self.timers.lock().await;
        timers.abort_all();
        debug!("Aborted {} pending unmark timer(s)", timers.len());
    }

    async fn write_clipboard(&self, text: &str) -> Result<(), ClipboardError> {
        let clipboard = Arc::clone(&self.clipboard);
        let text = text.to_string();
        tokio::task::spawn_blocking(move || clipboard.write_text(&text))
            .await
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))?
    }

    async fn mark(&self, index: usize, text: &str) {
        {
            let mut state = self.state.lock().await;
            match state.mark(index, text) {
                Some(next) => *state = next,
                None => {
                    debug!("Tweet {} changed before it could be marked", index + 1);
                    return;
                }
            }
        }
        debug!("Marked tweet {} for {:?}", index + 1, self.mark_duration);

        let state = Arc::clone(&self.state);
        let delay = self.mark_duration;
        let mut timers = self.timers.lock().await;
        while timers.try_join_next().is_some() {}
        timers.spawn(async move {
            tokio::time::sleep(delay).await;
            let mut guard = state.lock().await;
            let next = guard.unmark(index);
            *guard = next;
        });
    }
}
