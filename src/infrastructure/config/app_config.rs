//! Application configuration.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::args::CliArgs;
use crate::domain::entities::VariantPolicy;
use crate::infrastructure::cdn::{DEFAULT_CDN_BASE, DEFAULT_EMOJI_SIZE, EmojiUrlTemplate};

pub(crate) const APP_NAME: &str = "emojiclip";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "linuxmobile";

const GALLERY_DIR_NAME: &str = "emoji_gallery";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, read from `config.toml` and overridden by CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Gallery base directory. Holds `images/` and `metadata.json`.
    #[serde(default)]
    pub gallery_dir: Option<PathBuf>,

    /// Emoji CDN endpoint.
    #[serde(default = "default_cdn_base_url")]
    pub cdn_base_url: String,

    /// Requested emoji edge length in pixels.
    #[serde(default = "default_emoji_size")]
    pub emoji_size: u32,

    /// HTTP timeout. Unset means the transport default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Handling of the other variant when an ID is re-added with the opposite
    /// animated flag.
    #[serde(default)]
    pub variant_policy: VariantPolicy,

    /// Enable desktop notifications for failures.
    #[serde(default = "default_true")]
    pub enable_desktop_notifications: bool,
}

fn default_cdn_base_url() -> String {
    DEFAULT_CDN_BASE.to_string()
}

const fn default_emoji_size() -> u32 {
    DEFAULT_EMOJI_SIZE
}

const fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            gallery_dir: None,
            cdn_base_url: default_cdn_base_url(),
            emoji_size: DEFAULT_EMOJI_SIZE,
            request_timeout_secs: None,
            variant_policy: VariantPolicy::default(),
            enable_desktop_notifications: true,
        }
    }
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(gallery_dir) = &args.gallery_dir {
            self.gallery_dir = Some(gallery_dir.clone());
        }
        if let Some(cdn_base_url) = &args.cdn_base_url {
            self.cdn_base_url.clone_from(cdn_base_url);
        }
        if let Some(emoji_size) = args.emoji_size {
            self.emoji_size = emoji_size;
        }
        if let Some(timeout) = args.request_timeout_secs {
            self.request_timeout_secs = Some(timeout);
        }
        if let Some(policy) = args.variant_policy {
            self.variant_policy = policy;
        }
        if let Some(notifications) = args.enable_desktop_notifications {
            self.enable_desktop_notifications = notifications;
        }
    }

    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().join("emojiclip.log"))
    }

    /// Returns default gallery directory, falling back to `./emoji_gallery`.
    #[must_use]
    pub fn default_gallery_dir() -> PathBuf {
        Self::project_dirs().map_or_else(
            || PathBuf::from(GALLERY_DIR_NAME),
            |dirs| dirs.data_dir().join(GALLERY_DIR_NAME),
        )
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns effective gallery directory.
    #[must_use]
    pub fn effective_gallery_dir(&self) -> PathBuf {
        self.gallery_dir
            .clone()
            .unwrap_or_else(Self::default_gallery_dir)
    }

    /// URL template built from the CDN settings.
    #[must_use]
    pub fn url_template(&self) -> EmojiUrlTemplate {
        EmojiUrlTemplate::new(self.cdn_base_url.clone(), self.emoji_size)
    }

    /// HTTP timeout, if configured.
    #[must_use]
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
            gallery_dir = "/srv/emoji"
            emoji_size = 96
            variant_policy = "replace"
            enable_desktop_notifications = false
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.gallery_dir, Some(PathBuf::from("/srv/emoji")));
        assert_eq!(config.emoji_size, 96);
        assert_eq!(config.variant_policy, VariantPolicy::Replace);
        assert!(!config.enable_desktop_notifications);
        assert_eq!(config.cdn_base_url, DEFAULT_CDN_BASE);
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.url_template(), EmojiUrlTemplate::default());
        assert_eq!(config.variant_policy, VariantPolicy::Coexist);
        assert!(config.enable_desktop_notifications);
    }

    #[test]
    fn test_args_override_config() {
        let mut config = AppConfig::default();
        let args = CliArgs::try_parse_from([
            "emojiclip",
            "--gallery-dir",
            "/tmp/g",
            "--emoji-size",
            "32",
            "--variant-policy",
            "replace",
            "--request-timeout-secs",
            "10",
            "list",
        ])
        .unwrap();

        config.merge_with_args(&args);

        assert_eq!(config.effective_gallery_dir(), PathBuf::from("/tmp/g"));
        assert_eq!(config.emoji_size, 32);
        assert_eq!(config.variant_policy, VariantPolicy::Replace);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.log_level, LogLevel::Info);
    }
}
