//! Local emoji gallery persistence.

pub mod atomic_file;
pub mod gallery_store;
pub mod metadata;

pub use gallery_store::{GalleryStore, IMAGES_DIR_NAME, METADATA_FILE_NAME};
pub use metadata::Metadata;
