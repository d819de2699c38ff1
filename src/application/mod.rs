//! Application layer coordinating the gallery with the desktop.

/// Application services.
pub mod services;

pub use services::{GalleryService, OperationOutcome};
