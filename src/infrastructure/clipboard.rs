//! System clipboard adapter.
//!
//! On X11 and Wayland the clipboard is served by the process that set it, so
//! a short-lived CLI hands the text to a detached copy of itself which owns
//! the selection until something else is copied.

use arboard::Clipboard;
use tracing::{debug, warn};

use crate::domain::errors::ClipboardError;
use crate::domain::ports::ClipboardPort;

/// First argument that turns the process into a clipboard owner.
pub const CLIPBOARD_DAEMON_ARG: &str = "__serve-clipboard";

/// `arboard`-backed clipboard.
#[derive(Clone, Default)]
pub struct ClipboardService {
    hand_off: bool,
}

impl ClipboardService {
    /// Clipboard that keeps the text alive after this process exits.
    #[must_use]
    pub fn new() -> Self {
        Self { hand_off: true }
    }

    /// Returns the text to serve if `args` (including the program name)
    /// request the clipboard owner mode.
    pub fn daemon_text<I>(args: I) -> Option<String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter().skip(1);
        if args.next().as_deref() != Some(CLIPBOARD_DAEMON_ARG) {
            return None;
        }
        Some(args.next().unwrap_or_default())
    }

    /// Sets `text` and blocks until another application replaces it.
    ///
    /// # Errors
    /// Returns error if the clipboard cannot be opened or written.
    pub fn serve(text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = open()?;

        #[cfg(target_os = "linux")]
        {
            use arboard::SetExtLinux;
            clipboard
                .set()
                .wait()
                .text(text)
                .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
        }

        #[cfg(not(target_os = "linux"))]
        {
            clipboard
                .set_text(text)
                .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
        }
    }

    #[cfg(target_os = "linux")]
    fn spawn_owner(text: &str) -> Result<(), ClipboardError> {
        use std::process::{Command, Stdio};

        let exe = std::env::current_exe()
            .map_err(|e| ClipboardError::WriteFailed(format!("cannot locate executable: {e}")))?;

        Command::new(exe)
            .arg(CLIPBOARD_DAEMON_ARG)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .current_dir("/")
            .spawn()
            .map_err(|e| {
                warn!("Failed to start clipboard owner: {}", e);
                ClipboardError::WriteFailed(e.to_string())
            })?;

        Ok(())
    }

    #[cfg(not(target_os = "linux"))]
    #[allow(clippy::unnecessary_wraps)]
    fn spawn_owner(_text: &str) -> Result<(), ClipboardError> {
        Ok(())
    }
}

fn open() -> Result<Clipboard, ClipboardError> {
    Clipboard::new().map_err(|e| {
        warn!("Failed to initialize clipboard for copy: {}", e);
        ClipboardError::Unavailable(e.to_string())
    })
}

impl ClipboardPort for ClipboardService {
    fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = open()?;

        clipboard.set_text(text).map_err(|e| {
            warn!("Failed to set clipboard text: {}", e);
            ClipboardError::WriteFailed(e.to_string())
        })?;

        if self.hand_off {
            drop(clipboard);
            Self::spawn_owner(text)?;
        }

        debug!(len = text.len(), hand_off = self.hand_off, "Copied text to clipboard");
        Ok(())
    }
}
