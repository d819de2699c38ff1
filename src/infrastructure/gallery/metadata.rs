//! JSON sidecar mapping stored filenames to entry data.
//!
//! On disk the file is an object keyed by filename:
//!
//! ```json
//! {
//!   "123.webp": {
//!     "text": "https://cdn.discordapp.com/emojis/123.webp?size=48",
//!     "filename": "123.webp"
//!   }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde_json::{Map, Value, json};
use tracing::warn;

use super::atomic_file::write_atomic;
use crate::domain::entities::{GalleryEntry, filename_stem};
use crate::domain::errors::GalleryError;

/// In-memory mirror of the metadata file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: Vec<GalleryEntry>,
}

impl Metadata {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses file contents. Returns `None` unless the top level is an object.
    ///
    /// Values that are not objects, or lack fields, fall back to the
    /// filename stem for both the clipboard text and the display name.
    /// Keys that are not bare filenames inside the images directory are
    /// skipped.
    #[must_use]
    pub fn parse(content: &str) -> Option<Self> {
        let Value::Object(map) = serde_json::from_str::<Value>(content).ok()? else {
            return None;
        };

        let entries = map
            .iter()
            .filter(|(filename, _)| {
                let plain = is_plain_filename(filename);
                if !plain {
                    warn!(filename = %filename, "Skipping metadata key outside images directory");
                }
                plain
            })
            .map(|(filename, payload)| entry_from_value(filename, payload))
            .collect();

        Some(Self { entries })
    }

    /// Reads `path`, treating a missing, unreadable or malformed file as empty.
    #[must_use]
    pub fn read_or_default(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to read metadata file, starting empty"
                );
                return Self::new();
            }
        };

        Self::parse(&content).unwrap_or_else(|| {
            warn!(path = %path.display(), "Malformed metadata file, starting empty");
            Self::new()
        })
    }

    /// Serialises the mapping with two-space indentation.
    ///
    /// # Errors
    /// Returns error if serialisation fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|entry| {
                (
                    entry.filename().to_string(),
                    json!({
                        "text": entry.source_text(),
                        "filename": entry.display_name(),
                    }),
                )
            })
            .collect();

        serde_json::to_string_pretty(&Value::Object(map))
    }

    /// Writes the full mapping to `path` atomically.
    ///
    /// # Errors
    /// Returns [`GalleryError::Storage`] naming `path` on failure; the
    /// previous file is left intact.
    pub fn save(&self, path: &Path) -> Result<(), GalleryError> {
        let content = self
            .to_json_pretty()
            .map_err(|e| GalleryError::storage(path, e))?;
        write_atomic(path, content.as_bytes()).map_err(|e| GalleryError::storage(path, e))
    }

    /// Inserts `entry`, replacing any entry with the same filename in place.
    /// Returns the replaced entry.
    pub fn upsert(&mut self, entry: GalleryEntry) -> Option<GalleryEntry> {
        match self
            .entries
            .iter_mut()
            .find(|existing| existing.filename() == entry.filename())
        {
            Some(slot) => Some(std::mem::replace(slot, entry)),
            None => {
                self.entries.push(entry);
                None
            }
        }
    }

    /// Removes and returns the entry stored under `filename`.
    pub fn remove(&mut self, filename: &str) -> Option<GalleryEntry> {
        let index = self.entries.iter().position(|e| e.filename() == filename)?;
        Some(self.entries.remove(index))
    }

    /// Keeps only entries matching `keep`, returning the dropped ones.
    pub fn retain(&mut self, mut keep: impl FnMut(&GalleryEntry) -> bool) -> Vec<GalleryEntry> {
        let (kept, dropped): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|entry| keep(entry));
        self.entries = kept;
        dropped
    }

    /// Removes every entry, returning them in order.
    pub fn drain(&mut self) -> Vec<GalleryEntry> {
        std::mem::take(&mut self.entries)
    }

    /// Entry stored under `filename`.
    #[must_use]
    pub fn get(&self, filename: &str) -> Option<&GalleryEntry> {
        self.entries.iter().find(|e| e.filename() == filename)
    }

    /// Entries in file order.
    #[must_use]
    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn entry_from_value(filename: &str, payload: &Value) -> GalleryEntry {
    let stem = filename_stem(filename);

    GalleryEntry::new(filename, string_field(payload, "text").unwrap_or(stem))
        .with_display_name(string_field(payload, "filename").unwrap_or(stem))
}

fn is_plain_filename(filename: &str) -> bool {
    Path::new(filename)
        .file_name()
        .is_some_and(|name| name == filename)
}

fn string_field<'a>(payload: &'a Value, name: &str) -> Option<&'a str> {
    payload
        .get(name)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::EntryKind;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"{
  "9.webp": {
    "text": "https://cdn.discordapp.com/emojis/9.webp?size=48",
    "filename": "9.webp"
  },
  "1.gif": {
    "text": "https://cdn.discordapp.com/emojis/1.webp?size=48&animated=true",
    "filename": "1.gif"
  }
}"#;

    #[test]
    fn test_parse_preserves_file_order() {
        let metadata = Metadata::parse(SAMPLE).unwrap();
        let names: Vec<_> = metadata.entries().iter().map(GalleryEntry::filename).collect();

        assert_eq!(names, vec!["9.webp", "1.gif"]);
        assert_eq!(metadata.get("1.gif").unwrap().kind(), EntryKind::Animated);
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(Metadata::parse("[1, 2, 3]").is_none());
        assert!(Metadata::parse("\"text\"").is_none());
        assert!(Metadata::parse("{ not json").is_none());
    }

    #[test]
    fn test_parse_tolerates_bad_values() {
        let metadata = Metadata::parse(r#"{"5.webp": null, "6.webp": {"text": ""}}"#).unwrap();

        let five = metadata.get("5.webp").unwrap();
        assert_eq!(five.source_text(), "5");
        assert_eq!(five.display_name(), "5");
        assert_eq!(metadata.get("6.webp").unwrap().source_text(), "6");
    }

    #[test]
    fn test_parse_skips_keys_with_paths() {
        let metadata = Metadata::parse(
            r#"{"../metadata.json": {}, "/etc/passwd": {}, "a/1.webp": {}, "..": {}, "2.gif": {}}"#,
        )
        .unwrap();

        assert_eq!(metadata.len(), 1);
        assert!(metadata.get("2.gif").is_some());
    }

    #[test]
    fn test_serialisation_matches_file_format() {
        let metadata = Metadata::parse(SAMPLE).unwrap();
        assert_eq!(metadata.to_json_pretty().unwrap(), SAMPLE);
    }

    #[test]
    fn test_upsert_keeps_position() {
        let mut metadata = Metadata::parse(SAMPLE).unwrap();

        let replaced = metadata.upsert(GalleryEntry::new("9.webp", "new-text"));
        metadata.upsert(GalleryEntry::new("2.webp", "two"));

        assert_eq!(
            replaced.unwrap().source_text(),
            "https://cdn.discordapp.com/emojis/9.webp?size=48"
        );
        assert_eq!(metadata.entries()[0].source_text(), "new-text");
        assert_eq!(metadata.entries()[2].filename(), "2.webp");
    }

    #[test]
    fn test_read_or_default_recovers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metadata.json");

        assert!(Metadata::read_or_default(&path).is_empty());

        fs::write(&path, "{\"truncated\": ").unwrap();
        assert!(Metadata::read_or_default(&path).is_empty());
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("metadata.json");
        let metadata = Metadata::parse(SAMPLE).unwrap();

        metadata.save(&path).unwrap();

        assert_eq!(Metadata::read_or_default(&path), metadata);
    }
}
