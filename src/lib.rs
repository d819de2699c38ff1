//! emojiclip - a local gallery of CDN emoji with one-step clipboard copy.
//!
//! Emoji are fetched by numeric ID, stored as image files beside a JSON
//! metadata sidecar, and their CDN link is copied to the clipboard on request.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer coordinating store, clipboard and notifications.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer rendering gallery state for the terminal.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "emojiclip";
