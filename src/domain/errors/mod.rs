//! Domain error types.

mod clipboard_error;
mod gallery_error;

pub use clipboard_error::ClipboardError;
pub use gallery_error::GalleryError;
