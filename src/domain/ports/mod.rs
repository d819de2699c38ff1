mod clipboard_port;
mod emoji_fetcher_port;
mod notification_port;

pub use clipboard_port::ClipboardPort;
pub use emoji_fetcher_port::EmojiFetcherPort;
pub use notification_port::NotificationPort;

#[cfg(test)]
pub mod mocks {
    pub use super::clipboard_port::mock::MockClipboard;
    pub use super::emoji_fetcher_port::mock::{MockEmojiFetcher, sample_png};
    pub use super::notification_port::mock::MockNotificationPort;
}
