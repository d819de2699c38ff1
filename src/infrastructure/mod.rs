//! Infrastructure layer with external service adapters.

/// Emoji CDN addressing.
pub mod cdn;
pub mod clipboard;
/// Application configuration.
pub mod config;
/// Remote emoji retrieval.
pub mod fetcher;
/// Gallery persistence.
pub mod gallery;
/// Desktop notifications.
pub mod notifications;

pub use cdn::EmojiUrlTemplate;
pub use clipboard::ClipboardService;
pub use config::{AppConfig, CliArgs, Command, ConfigLoader, LogLevel};
pub use fetcher::{HttpEmojiFetcher, RemoteFetcher};
pub use gallery::GalleryStore;
pub use notifications::DesktopNotificationService;
