use crate::domain::errors::ClipboardError;

/// Port for writing to the system clipboard.
pub trait ClipboardPort: Send + Sync {
    /// Replaces the clipboard contents with `text`.
    fn set_text(&self, text: &str) -> Result<(), ClipboardError>;
}
