//! Fakes for the generator and host side-effect seams, shared by unit and router tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex};
use tokio::net::TcpListener;
use tokio::sync::Notify;

use crate::clipboard::{ClipboardWriter, LinkOpener};
use crate::error::{ClipboardError, RemixError};
use crate::remix::{RemixMode, TextGenerator};

/// Returns a fixed response and counts calls.
pub struct ScriptedGenerator {
    response: String,
    pub calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, _text: &str, _mode: RemixMode) -> Result<String, RemixError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

/// Always fails, like a transport error would after the client logged it.
pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _text: &str, _mode: RemixMode) -> Result<String, RemixError> {
        Err(RemixError::GenerationFailure)
    }
}

/// Holds every call until [`GatedGenerator::release`] is called.
pub struct GatedGenerator {
    response: String,
    gate: Notify,
    pub calls: AtomicUsize,
}

impl GatedGenerator {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            gate: Notify::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl TextGenerator for GatedGenerator {
    async fn generate(&self, _text: &str, _mode: RemixMode) -> Result<String, RemixError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Ok(self.response.clone())
    }
}

#[derive(Default)]
pub struct RecordingClipboard {
    fail: bool,
    written: Mutex<Vec<String>>,
}

impl RecordingClipboard {
    pub fn failing() -> Self {
        Self {
            fail: true,
            written: Mutex::new(Vec::new()),
        }
    }

    pub fn written(&self) -> Vec<String> {
        self.written.lock().unwrap().clone()
    }
}

impl ClipboardWriter for RecordingClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::Unavailable("no display".to_string()));
        }
        self.written.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Blocks every write until [`GatedClipboard::release`] is called.
#[derive(Default)]
pub struct GatedClipboard {
    entered: AtomicBool,
    open: Mutex<bool>,
    gate: Condvar,
    written: Mutex<Vec<String>>,
}

impl GatedClipboard {
    /// Whether a write has started and is waiting at the gate.
    pub fn entered(&self) -> bool {
        self.entered.load(Ordering::SeqCst)
    }

    pub fn release(&self) {
        *self.open.lock().unwrap() = true;
        self.gate.notify_all();
    }

    pub fn written(&self) -> Vec<String> {
        self.written.lock().unwrap().clone()
    }
}

impl ClipboardWriter for GatedClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.entered.store(true, Ordering::SeqCst);
        let mut open = self.open.lock().unwrap();
        while !*open {
            open = self.gate.wait(open).unwrap();
        }
        self.written.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingOpener {
    opened: Mutex<Vec<String>>,
}

impl RecordingOpener {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl LinkOpener for RecordingOpener {
    fn open_link(&self, url: &str) -> Result<(), ClipboardError> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

/// Accepts connections on an ephemeral local port and never answers them.
///
/// Returns a Messages URL on that port.
pub async fn spawn_stalled_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}/v1/messages", addr)
}
