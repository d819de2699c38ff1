//! Clipboard error types.

use thiserror::Error;

/// System clipboard failures.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("failed to set clipboard text: {0}")]
    WriteFailed(String),
}
