//! Host side effects for the per-tweet actions.
//!
//! The service runs on the user's own machine, so "copy" writes to the host
//! clipboard and "share" opens the share link in the host's default browser.

use crate::error::ClipboardError;

/// Write-only access to a clipboard.
pub trait ClipboardWriter: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// Opens a URL in a new browsing context.
pub trait LinkOpener: Send + Sync {
    fn open_link(&self, url: &str) -> Result<(), ClipboardError>;
}

/// The host's system clipboard.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

/// The host's default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserOpener;

impl LinkOpener for BrowserOpener {
    fn open_link(&self, url: &str) -> Result<(), ClipboardError> {
        open::that(url)?;
        Ok(())
    }
}
