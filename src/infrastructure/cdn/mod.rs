//! Emoji CDN addressing.

pub mod emoji_cdn;

pub use emoji_cdn::{DEFAULT_CDN_BASE, DEFAULT_EMOJI_SIZE, EmojiUrlTemplate};
