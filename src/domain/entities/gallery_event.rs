//! Notifications emitted by the gallery store for the presentation layer.

use std::path::PathBuf;

use super::DisplayHandle;

/// Change notification carrying enough data to render without re-querying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryEvent {
    /// An entry was added or overwritten.
    EntryAdded(DisplayHandle),
    /// An entry was removed.
    EntryRemoved {
        /// Stored filename of the removed entry.
        filename: String,
        /// Location the image file was deleted from.
        path: PathBuf,
    },
    /// Every entry was removed.
    EntriesCleared {
        /// Number of entries that were present.
        count: usize,
    },
    /// Entries were read from disk.
    EntriesLoaded {
        /// Number of entries that survived pruning.
        count: usize,
    },
}
