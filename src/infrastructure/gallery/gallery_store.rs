//! On-disk emoji gallery: an image directory plus a JSON metadata sidecar.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::metadata::Metadata;
use crate::domain::entities::{
    DisplayHandle, EmojiId, EntryKind, GalleryEntry, GalleryEvent, VariantPolicy,
};
use crate::domain::errors::GalleryError;
use crate::infrastructure::fetcher::RemoteFetcher;

/// Subdirectory holding image files.
pub const IMAGES_DIR_NAME: &str = "images";

/// Metadata file name inside the base directory.
pub const METADATA_FILE_NAME: &str = "metadata.json";

/// Owns the image directory and the metadata mapping.
///
/// Every mutation rewrites the full metadata file atomically. When a write
/// fails, the in-memory mapping is rolled back to the last persisted state.
pub struct GalleryStore {
    base_dir: PathBuf,
    images_dir: PathBuf,
    metadata_path: PathBuf,
    metadata: Metadata,
    fetcher: RemoteFetcher,
    policy: VariantPolicy,
    event_tx: Option<mpsc::UnboundedSender<GalleryEvent>>,
}

impl std::fmt::Debug for GalleryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GalleryStore")
            .field("base_dir", &self.base_dir)
            .field("entries", &self.metadata.len())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl GalleryStore {
    /// Creates a store rooted at `base_dir`. Nothing touches disk until
    /// [`init`](Self::init).
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>, fetcher: RemoteFetcher) -> Self {
        let base_dir = base_dir.into();
        Self {
            images_dir: base_dir.join(IMAGES_DIR_NAME),
            metadata_path: base_dir.join(METADATA_FILE_NAME),
            base_dir,
            metadata: Metadata::new(),
            fetcher,
            policy: VariantPolicy::default(),
            event_tx: None,
        }
    }

    /// Sets the policy applied when an ID is re-added with the other kind.
    #[must_use]
    pub fn with_policy(mut self, policy: VariantPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Attaches a sink for [`GalleryEvent`]s.
    #[must_use]
    pub fn with_events(mut self, event_tx: mpsc::UnboundedSender<GalleryEvent>) -> Self {
        self.event_tx = Some(event_tx);
        self
    }

    /// Creates the directories and an empty metadata file when absent.
    ///
    /// # Errors
    /// Returns [`GalleryError::Storage`] if a directory or the initial file
    /// cannot be created.
    pub fn init(&self) -> Result<(), GalleryError> {
        for dir in [&self.base_dir, &self.images_dir] {
            fs::create_dir_all(dir).map_err(|e| GalleryError::storage(dir, e))?;
        }

        if !self.metadata_path.exists() {
            info!(path = %self.metadata_path.display(), "Creating empty metadata file");
            Metadata::new().save(&self.metadata_path)?;
        }

        Ok(())
    }

    /// Reads the metadata file and prunes entries whose image is missing.
    ///
    /// A malformed file loads as empty. When anything was pruned the file is
    /// rewritten; a failure to do so is logged, not returned.
    pub fn load(&mut self) -> Vec<GalleryEntry> {
        let mut metadata = Metadata::read_or_default(&self.metadata_path);
        let images_dir = &self.images_dir;
        let pruned = metadata.retain(|entry| images_dir.join(entry.filename()).is_file());

        for entry in &pruned {
            debug!(filename = %entry.filename(), "Pruning entry with missing image");
        }

        self.metadata = metadata;

        if !pruned.is_empty() {
            info!(count = pruned.len(), "Pruned entries with missing images");
            if let Err(e) = self.persist() {
                warn!(error = %e, "Failed to persist pruned metadata");
            }
        }

        let count = self.metadata.len();
        debug!(count, "Loaded gallery");
        self.emit(GalleryEvent::EntriesLoaded { count });

        self.metadata.entries().to_vec()
    }

    /// Downloads `id` and records it as `{id}.webp` or `{id}.gif`.
    ///
    /// Re-adding the same `id` and kind overwrites the entry in place. The
    /// other kind's entry for the same `id` is kept or removed according to
    /// the store's [`VariantPolicy`].
    ///
    /// # Errors
    /// Returns [`GalleryError::InvalidId`] for non-numeric ids, fetch and
    /// conversion errors from the fetcher, and [`GalleryError::Storage`] if
    /// the metadata cannot be written. No metadata is recorded on failure.
    pub async fn add(&mut self, id: &str, animated: bool) -> Result<GalleryEntry, GalleryError> {
        let id = EmojiId::parse(id).ok_or_else(|| GalleryError::invalid_id(id))?;
        let kind = EntryKind::from_animated(animated);
        let filename = kind.filename_for(&id);
        let had_image = self.image_path(&filename).is_file();

        let fetched = self
            .fetcher
            .materialize(&id, animated, &self.images_dir.join(id.as_str()))
            .await?;

        let entry = GalleryEntry::new(filename, fetched.source_url);
        let snapshot = self.metadata.clone();

        let displaced = match self.policy {
            VariantPolicy::Coexist => None,
            VariantPolicy::Replace => self.metadata.remove(&kind.other().filename_for(&id)),
        };
        self.metadata.upsert(entry.clone());

        if let Err(e) = self.persist() {
            self.metadata = snapshot;
            if !had_image {
                if let Err(remove_err) = fs::remove_file(&fetched.path) {
                    warn!(path = %fetched.path.display(), error = %remove_err, "Failed to roll back image");
                }
            }
            return Err(e);
        }

        if let Some(old) = displaced {
            self.delete_image(old.filename());
            info!(filename = %old.filename(), "Replaced other variant");
            self.emit(GalleryEvent::EntryRemoved {
                path: self.image_path(old.filename()),
                filename: old.filename().to_string(),
            });
        }

        info!(filename = %entry.filename(), kind = %fetched.kind, "Added gallery entry");
        self.emit(GalleryEvent::EntryAdded(entry.to_handle(&self.images_dir)));

        Ok(entry)
    }

    /// Removes `filename` and its image. Removing an unknown key is a no-op.
    ///
    /// Returns whether an entry was removed.
    ///
    /// # Errors
    /// Returns [`GalleryError::Storage`] if the metadata cannot be written;
    /// the entry and its image are then left in place.
    pub fn remove(&mut self, filename: &str) -> Result<bool, GalleryError> {
        let snapshot = self.metadata.clone();

        if self.metadata.remove(filename).is_none() {
            debug!(filename = %filename, "No entry to remove");
            return Ok(false);
        }

        if let Err(e) = self.persist() {
            self.metadata = snapshot;
            return Err(e);
        }

        self.delete_image(filename);
        info!(filename = %filename, "Removed gallery entry");
        self.emit(GalleryEvent::EntryRemoved {
            filename: filename.to_string(),
            path: self.image_path(filename),
        });

        Ok(true)
    }

    /// Removes every entry and its image.
    ///
    /// The empty mapping is persisted first; image deletion failures are
    /// logged and do not affect the result. Returns the number of entries
    /// removed.
    ///
    /// # Errors
    /// Returns [`GalleryError::Storage`] if the metadata cannot be written;
    /// nothing is removed in that case.
    pub fn clear(&mut self) -> Result<usize, GalleryError> {
        let snapshot = self.metadata.clone();
        let removed = self.metadata.drain();

        if let Err(e) = self.persist() {
            self.metadata = snapshot;
            return Err(e);
        }

        let failed = removed
            .iter()
            .filter(|entry| !self.delete_image(entry.filename()))
            .count();
        if failed > 0 {
            warn!(failed, "Some images could not be deleted while clearing");
        }

        let count = removed.len();
        info!(count, "Cleared gallery");
        self.emit(GalleryEvent::EntriesCleared { count });

        Ok(count)
    }

    /// Returns the clipboard text for `key`.
    ///
    /// Tries `key` as a stored filename first, then `key + ".webp"` for
    /// display keys that omit the extension.
    #[must_use]
    pub fn resolve_clipboard_text(&self, key: &str) -> Option<&str> {
        self.metadata
            .get(key)
            .or_else(|| self.metadata.get(&format!("{key}.webp")))
            .map(GalleryEntry::source_text)
    }

    /// Entry stored under `filename`.
    #[must_use]
    pub fn get(&self, filename: &str) -> Option<&GalleryEntry> {
        self.metadata.get(filename)
    }

    /// Entries in metadata order.
    #[must_use]
    pub fn entries(&self) -> &[GalleryEntry] {
        self.metadata.entries()
    }

    /// Display projections of every entry.
    #[must_use]
    pub fn handles(&self) -> Vec<DisplayHandle> {
        self.metadata
            .entries()
            .iter()
            .map(|entry| entry.to_handle(&self.images_dir))
            .collect()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.metadata.len()
    }

    /// Returns true if the gallery has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
    }

    /// Policy applied when an ID is re-added as the other kind.
    #[must_use]
    pub fn policy(&self) -> VariantPolicy {
        self.policy
    }

    /// Location of the image stored under `filename`.
    #[must_use]
    pub fn image_path(&self, filename: &str) -> PathBuf {
        self.images_dir.join(filename)
    }

    /// Gallery root.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory holding the image files.
    #[must_use]
    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Location of `metadata.json`.
    #[must_use]
    pub fn metadata_path(&self) -> &Path {
        &self.metadata_path
    }

    fn persist(&self) -> Result<(), GalleryError> {
        self.metadata.save(&self.metadata_path).inspect_err(|e| {
            warn!(error = %e, "Failed to persist metadata");
        })
    }

    /// Deletes an image file. A missing file counts as deleted.
    fn delete_image(&self, filename: &str) -> bool {
        let path = self.image_path(filename);
        match fs::remove_file(&path) {
            Ok(()) => true,
            Err(e) if e.kind() == io::ErrorKind::NotFound => true,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to delete image");
                false
            }
        }
    }

    fn emit(&self, event: GalleryEvent) {
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(event);
        }
    }
}
