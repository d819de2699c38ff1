//! User-facing gallery workflow.
//!
//! Wraps the [`GalleryStore`] together with the clipboard and notifier, and
//! turns every failure into an [`OperationOutcome`] so a single failed
//! operation never escapes to the caller as an error.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::domain::entities::{DisplayHandle, GalleryEvent};
use crate::domain::errors::GalleryError;
use crate::domain::ports::{ClipboardPort, NotificationPort};
use crate::infrastructure::gallery::GalleryStore;

/// Result of a user action, ready to be shown in a status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationOutcome {
    /// Action completed.
    Success(String),
    /// Nothing to do.
    NoOp(String),
    /// Action failed; the user was notified.
    Failure {
        /// Notification heading.
        title: String,
        /// Detail naming what failed.
        message: String,
    },
}

impl OperationOutcome {
    /// Returns true unless the action failed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Failure { .. })
    }
}

impl fmt::Display for OperationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(message) | Self::NoOp(message) => write!(f, "{message}"),
            Self::Failure { title, message } => write!(f, "{title}: {message}"),
        }
    }
}

/// Orchestrates store operations, clipboard writes and notifications.
pub struct GalleryService {
    store: GalleryStore,
    clipboard: Arc<dyn ClipboardPort>,
    notifier: Arc<dyn NotificationPort>,
    events: mpsc::UnboundedReceiver<GalleryEvent>,
}

impl GalleryService {
    /// Creates the service and subscribes to the store's events.
    #[must_use]
    pub fn new(
        store: GalleryStore,
        clipboard: Arc<dyn ClipboardPort>,
        notifier: Arc<dyn NotificationPort>,
    ) -> Self {
        let (event_tx, events) = mpsc::unbounded_channel();
        Self {
            store: store.with_events(event_tx),
            clipboard,
            notifier,
            events,
        }
    }

    /// Prepares storage and loads persisted entries.
    ///
    /// # Errors
    /// Returns error if the gallery directories cannot be created.
    pub fn start(&mut self) -> Result<Vec<DisplayHandle>, GalleryError> {
        self.store.init()?;
        let loaded = self.store.load();
        info!(
            count = loaded.len(),
            policy = %self.store.policy(),
            "Gallery ready"
        );
        Ok(self.store.handles())
    }

    /// Downloads and stores an emoji.
    pub async fn add(&mut self, id: &str, animated: bool) -> OperationOutcome {
        match self.store.add(id, animated).await {
            Ok(entry) => OperationOutcome::Success(format!("Added {}", entry.filename())),
            Err(e) => self.fail(&e),
        }
    }

    /// Removes every selected entry.
    pub fn remove_selection(&mut self, filenames: &[String]) -> OperationOutcome {
        if filenames.is_empty() {
            return OperationOutcome::NoOp("No selection to remove.".to_string());
        }

        let mut removed = 0usize;
        for filename in filenames {
            match self.store.remove(filename) {
                Ok(true) => removed += 1,
                Ok(false) => debug!(filename = %filename, "Nothing stored under filename"),
                Err(e) => return self.fail(&e),
            }
        }

        OperationOutcome::Success(format!("Removed {removed} item(s)."))
    }

    /// Removes every entry.
    pub fn clear_all(&mut self) -> OperationOutcome {
        if self.store.is_empty() {
            return OperationOutcome::NoOp("Gallery is already empty.".to_string());
        }

        match self.store.clear() {
            Ok(count) => OperationOutcome::Success(format!("Cleared {count} item(s).")),
            Err(e) => self.fail(&e),
        }
    }

    /// Copies the clipboard text stored for `key`.
    pub fn copy(&self, key: &str) -> OperationOutcome {
        let Some(text) = self.store.resolve_clipboard_text(key) else {
            return self.notify_failure("Unknown Entry", format!("No entry stored as '{key}'"));
        };

        match self.clipboard.set_text(text) {
            Ok(()) => OperationOutcome::Success(format!("Copied to clipboard: {text}")),
            Err(e) => self.notify_failure("Clipboard Error", e.to_string()),
        }
    }

    /// Display projections in gallery order.
    #[must_use]
    pub fn handles(&self) -> Vec<DisplayHandle> {
        self.store.handles()
    }

    /// Read-only access to the store.
    #[must_use]
    pub fn store(&self) -> &GalleryStore {
        &self.store
    }

    /// Takes every event emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<GalleryEvent> {
        let mut drained = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            drained.push(event);
        }
        drained
    }

    fn fail(&self, error: &GalleryError) -> OperationOutcome {
        self.notify_failure(error.title(), error.to_string())
    }

    fn notify_failure(&self, title: &str, message: String) -> OperationOutcome {
        warn!(title = %title, message = %message, "Gallery operation failed");
        self.notifier.send(title, &message);
        OperationOutcome::Failure {
            title: title.to_string(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::{MockClipboard, MockEmojiFetcher, MockNotificationPort};
    use crate::infrastructure::cdn::EmojiUrlTemplate;
    use crate::infrastructure::fetcher::RemoteFetcher;
    use tempfile::TempDir;

    struct Harness {
        service: GalleryService,
        clipboard: Arc<MockClipboard>,
        notifier: Arc<MockNotificationPort>,
        transport: Arc<MockEmojiFetcher>,
        _temp: TempDir,
    }

    fn harness_with(clipboard: MockClipboard) -> Harness {
        let temp = TempDir::new().unwrap();
        let transport = Arc::new(MockEmojiFetcher::with_sample_image());
        let clipboard = Arc::new(clipboard);
        let notifier = Arc::new(MockNotificationPort::new());
        let fetcher = RemoteFetcher::new(transport.clone(), EmojiUrlTemplate::default());
        let store = GalleryStore::new(temp.path(), fetcher);

        let mut service = GalleryService::new(store, clipboard.clone(), notifier.clone());
        service.start().unwrap();

        Harness {
            service,
            clipboard,
            notifier,
            transport,
            _temp: temp,
        }
    }

    fn harness() -> Harness {
        harness_with(MockClipboard::new())
    }

    #[tokio::test]
    async fn test_add_then_copy() {
        let mut h = harness();

        let outcome = h.service.add("123", false).await;
        assert_eq!(outcome, OperationOutcome::Success("Added 123.webp".to_string()));

        let outcome = h.service.copy("123");
        assert!(outcome.is_success());
        assert_eq!(
            h.clipboard.last().as_deref(),
            Some("https://cdn.discordapp.com/emojis/123.webp?size=48")
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_is_notified() {
        let mut h = harness();
        h.transport.set_should_fail(true);

        let outcome = h.service.add("123", false).await;

        assert!(!outcome.is_success());
        assert_eq!(h.notifier.titles(), vec!["Download Error".to_string()]);
        assert!(h.service.handles().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_id_is_notified() {
        let mut h = harness();

        let outcome = h.service.add("abc", true).await;

        match outcome {
            OperationOutcome::Failure { title, message } => {
                assert_eq!(title, "Invalid ID");
                assert!(message.contains("abc"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_remove_selection_counts_removed() {
        let mut h = harness();
        h.service.add("1", false).await;
        h.service.add("2", true).await;

        let outcome =
            h.service
                .remove_selection(&["1.webp".to_string(), "missing.webp".to_string()]);

        assert_eq!(outcome, OperationOutcome::Success("Removed 1 item(s).".to_string()));
        assert_eq!(h.service.handles().len(), 1);
        assert!(matches!(
            h.service.remove_selection(&[]),
            OperationOutcome::NoOp(_)
        ));
    }

    #[tokio::test]
    async fn test_clear_all() {
        let mut h = harness();
        assert!(matches!(h.service.clear_all(), OperationOutcome::NoOp(_)));

        h.service.add("1", false).await;
        h.service.add("2", false).await;

        assert_eq!(
            h.service.clear_all(),
            OperationOutcome::Success("Cleared 2 item(s).".to_string())
        );
        assert!(h.service.store().is_empty());
    }

    #[test]
    fn test_copy_unknown_key() {
        let h = harness();

        let outcome = h.service.copy("999");

        assert!(!outcome.is_success());
        assert_eq!(h.notifier.titles(), vec!["Unknown Entry".to_string()]);
        assert!(h.clipboard.last().is_none());
    }

    #[tokio::test]
    async fn test_clipboard_failure_is_notified() {
        let mut h = harness_with(MockClipboard::unavailable());
        h.service.add("5", false).await;

        let outcome = h.service.copy("5.webp");

        assert!(matches!(outcome, OperationOutcome::Failure { ref title, .. } if title == "Clipboard Error"));
    }

    #[tokio::test]
    async fn test_events_are_forwarded() {
        let mut h = harness();
        assert_eq!(
            h.service.drain_events(),
            vec![GalleryEvent::EntriesLoaded { count: 0 }]
        );

        h.service.add("8", false).await;
        let events = h.service.drain_events();

        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], GalleryEvent::EntryAdded(handle) if handle.filename == "8.webp"));
        assert!(h.service.drain_events().is_empty());
    }
}
