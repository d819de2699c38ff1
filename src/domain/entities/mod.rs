//! Domain entity definitions.

mod gallery_entry;
mod gallery_event;

pub use gallery_entry::{
    DisplayHandle, EmojiId, EntryKind, GalleryEntry, VariantPolicy, filename_stem,
};
pub use gallery_event::GalleryEvent;
