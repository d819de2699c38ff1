//! Gallery entry value objects.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Numeric emoji identifier as issued by the CDN.
///
/// The identifier doubles as the stored filename stem, so only ASCII digits
/// are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmojiId(String);

impl EmojiId {
    /// Parses an identifier, trimming surrounding whitespace.
    #[must_use]
    pub fn parse(value: impl AsRef<str>) -> Option<Self> {
        let value = value.as_ref().trim();

        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        Some(Self(value.to_string()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmojiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether an entry is a still image or a looping animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntryKind {
    /// Single frame, stored as `.webp`.
    #[default]
    Static,
    /// Looping animation, stored as `.gif`.
    Animated,
}

impl EntryKind {
    /// Maps the user-facing "GIF" toggle to a kind.
    #[must_use]
    pub const fn from_animated(animated: bool) -> Self {
        if animated { Self::Animated } else { Self::Static }
    }

    /// Derives the kind from a stored filename's extension.
    #[must_use]
    pub fn from_filename(filename: &str) -> Self {
        let is_gif = Path::new(filename)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gif"));
        Self::from_animated(is_gif)
    }

    /// Returns true for animated entries.
    #[must_use]
    pub const fn is_animated(self) -> bool {
        matches!(self, Self::Animated)
    }

    /// File extension used for stored images of this kind.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Static => "webp",
            Self::Animated => "gif",
        }
    }

    /// The opposite kind.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Static => Self::Animated,
            Self::Animated => Self::Static,
        }
    }

    /// Stored filename for `id` with this kind's extension.
    #[must_use]
    pub fn filename_for(self, id: &EmojiId) -> String {
        format!("{id}.{}", self.extension())
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static => write!(f, "static"),
            Self::Animated => write!(f, "animated"),
        }
    }
}

/// What happens to the other-kind file when an ID is re-added with the
/// opposite animated flag.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum VariantPolicy {
    /// Both variants are kept as separate entries.
    #[default]
    Coexist,
    /// The previous variant's file and entry are removed.
    Replace,
}

impl fmt::Display for VariantPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coexist => write!(f, "coexist"),
            Self::Replace => write!(f, "replace"),
        }
    }
}

/// One stored image plus the text copied to the clipboard for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry {
    filename: String,
    source_text: String,
    display_name: String,
    kind: EntryKind,
}

impl GalleryEntry {
    /// Creates an entry whose display name is its filename.
    #[must_use]
    pub fn new(filename: impl Into<String>, source_text: impl Into<String>) -> Self {
        let filename = filename.into();
        Self {
            kind: EntryKind::from_filename(&filename),
            display_name: filename.clone(),
            source_text: source_text.into(),
            filename,
        }
    }

    /// Overrides the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Stored filename, including extension. Unique key of the entry.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Clipboard payload.
    #[must_use]
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// Name shown to the user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Static or animated, derived from the extension.
    #[must_use]
    pub const fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Builds the read-only projection handed to the presentation layer.
    #[must_use]
    pub fn to_handle(&self, images_dir: &Path) -> DisplayHandle {
        DisplayHandle {
            filename: self.filename.clone(),
            display_text: self.display_name.clone(),
            path: images_dir.join(&self.filename),
            kind: self.kind,
        }
    }
}

/// Read-only view of an entry for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayHandle {
    /// Stored filename.
    pub filename: String,
    /// Label shown next to the image.
    pub display_text: String,
    /// Absolute location of the image file.
    pub path: PathBuf,
    /// Static or animated.
    pub kind: EntryKind,
}

/// Returns `filename` up to its last extension.
#[must_use]
pub fn filename_stem(filename: &str) -> &str {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
}
