//! Discord emoji CDN URL construction.

use crate::domain::entities::{EmojiId, EntryKind};

/// Default emoji endpoint.
pub const DEFAULT_CDN_BASE: &str = "https://cdn.discordapp.com/emojis";

/// Default requested edge length in pixels.
pub const DEFAULT_EMOJI_SIZE: u32 = 48;

/// Builds download URLs of the form `{base}/{id}.webp?size={size}`.
///
/// Animated requests append `&animated=true`. The resulting URL is also the
/// text copied to the clipboard for the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiUrlTemplate {
    base_url: String,
    size: u32,
}

impl Default for EmojiUrlTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_CDN_BASE, DEFAULT_EMOJI_SIZE)
    }
}

impl EmojiUrlTemplate {
    /// Creates a template; a trailing slash on `base_url` is ignored.
    #[must_use]
    pub fn new(base_url: impl Into<String>, size: u32) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, size }
    }

    /// Returns the URL for `id` in the requested kind.
    #[must_use]
    pub fn build(&self, id: &EmojiId, kind: EntryKind) -> String {
        let mut url = format!("{}/{id}.webp?size={}", self.base_url, self.size);
        if kind.is_animated() {
            url.push_str("&animated=true");
        }
        url
    }
}
