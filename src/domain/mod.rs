//! Domain layer with core gallery entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{DisplayHandle, EmojiId, EntryKind, GalleryEntry, GalleryEvent};
pub use errors::{ClipboardError, GalleryError};
pub use ports::{ClipboardPort, EmojiFetcherPort, NotificationPort};
