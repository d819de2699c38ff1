//! Remote emoji retrieval.
//!
//! This module provides:
//! - The `reqwest` transport
//! - GIF re-encoding for animated requests
//! - The fetch-and-write pipeline used by the gallery store

pub mod gif_converter;
pub mod http_fetcher;
pub mod remote_fetcher;

pub use gif_converter::convert_to_gif;
pub use http_fetcher::HttpEmojiFetcher;
pub use remote_fetcher::{FetchedEmoji, RemoteFetcher};
