//! Download-and-materialise pipeline for a single emoji.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, warn};

use super::gif_converter::convert_to_gif;
use crate::domain::entities::{EmojiId, EntryKind};
use crate::domain::errors::GalleryError;
use crate::domain::ports::EmojiFetcherPort;
use crate::infrastructure::cdn::EmojiUrlTemplate;
use crate::infrastructure::gallery::atomic_file::write_atomic;

/// A downloaded emoji written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedEmoji {
    /// Final file location (`{dest_stem}.webp` or `{dest_stem}.gif`).
    pub path: PathBuf,
    /// Kind of the written file.
    pub kind: EntryKind,
    /// URL the payload was retrieved from.
    pub source_url: String,
}

/// Builds the download URL, retrieves the payload and, for animated
/// requests, re-encodes it as GIF.
pub struct RemoteFetcher {
    transport: Arc<dyn EmojiFetcherPort>,
    template: EmojiUrlTemplate,
}

impl std::fmt::Debug for RemoteFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteFetcher")
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

impl RemoteFetcher {
    /// Creates a fetcher over `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn EmojiFetcherPort>, template: EmojiUrlTemplate) -> Self {
        Self {
            transport,
            template,
        }
    }

    /// URL requested for `id` in the given kind.
    #[must_use]
    pub fn source_url(&self, id: &EmojiId, kind: EntryKind) -> String {
        self.template.build(id, kind)
    }

    /// Retrieves the final bytes for `id`.
    ///
    /// The conversion happens in memory on a blocking worker, so the static
    /// intermediate never reaches disk.
    ///
    /// # Errors
    /// Returns [`GalleryError::Fetch`] on transport failure and
    /// [`GalleryError::Conversion`] if an animated payload cannot be re-encoded.
    pub async fn fetch(
        &self,
        id: &EmojiId,
        animated: bool,
    ) -> Result<(Bytes, EntryKind), GalleryError> {
        let kind = EntryKind::from_animated(animated);
        let url = self.source_url(id, kind);
        let payload = self.transport.fetch_bytes(&url).await?;

        if !kind.is_animated() {
            return Ok((payload, kind));
        }

        let gif = tokio::task::spawn_blocking(move || convert_to_gif(&payload))
            .await
            .map_err(|e| {
                GalleryError::conversion(id.as_str(), format!("conversion task panicked: {e}"))
            })?
            .map_err(|e| {
                warn!(id = %id, error = %e, "Animated conversion failed");
                GalleryError::conversion(id.as_str(), e.to_string())
            })?;

        debug!(id = %id, size = gif.len(), "Converted emoji to gif");
        Ok((Bytes::from(gif), kind))
    }

    /// Fetches `id` and writes it to `{dest_stem}.{ext}`.
    ///
    /// Nothing is written when the fetch or conversion fails.
    ///
    /// # Errors
    /// Propagates [`fetch`](Self::fetch) errors; returns
    /// [`GalleryError::Storage`] if the file cannot be written.
    pub async fn materialize(
        &self,
        id: &EmojiId,
        animated: bool,
        dest_stem: &Path,
    ) -> Result<FetchedEmoji, GalleryError> {
        let (bytes, kind) = self.fetch(id, animated).await?;
        let path = dest_stem.with_extension(kind.extension());

        write_atomic(&path, &bytes).map_err(|e| GalleryError::storage(&path, e))?;
        debug!(id = %id, path = %path.display(), "Stored emoji image");

        Ok(FetchedEmoji {
            path,
            kind,
            source_url: self.source_url(id, kind),
        })
    }
}
