//! Gallery error types.

use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by gallery operations.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum GalleryError {
    #[error("invalid emoji id '{id}': expected digits only")]
    InvalidId { id: String },

    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("failed to convert emoji {id} to gif: {message}")]
    Conversion { id: String, message: String },

    #[error("storage error at {}: {message}", .path.display())]
    Storage { path: PathBuf, message: String },
}

impl GalleryError {
    /// Creates invalid id error.
    #[must_use]
    pub fn invalid_id(id: impl Into<String>) -> Self {
        Self::InvalidId { id: id.into() }
    }

    /// Creates fetch error.
    #[must_use]
    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates conversion error.
    #[must_use]
    pub fn conversion(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Conversion {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Creates storage error for the failing path.
    #[must_use]
    pub fn storage(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Storage {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Short heading used for user-facing notifications.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::InvalidId { .. } => "Invalid ID",
            Self::Fetch { .. } => "Download Error",
            Self::Conversion { .. } => "Conversion Error",
            Self::Storage { .. } => "Save Error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_names_path() {
        let err = GalleryError::storage("/data/metadata.json", "disk full");
        assert_eq!(
            err.to_string(),
            "storage error at /data/metadata.json: disk full"
        );
        assert_eq!(err.title(), "Save Error");
    }
}
