//! Command-line arguments.

use super::app_config::LogLevel;
use crate::domain::entities::VariantPolicy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "emojiclip",
    version,
    about = "Keep a local gallery of CDN emoji and copy their links to the clipboard",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Gallery directory.
    #[arg(long, value_name = "DIR", global = true)]
    pub gallery_dir: Option<PathBuf>,

    /// Emoji CDN endpoint.
    #[arg(long, value_name = "URL", global = true)]
    pub cdn_base_url: Option<String>,

    /// Requested emoji size in pixels.
    #[arg(long, global = true)]
    pub emoji_size: Option<u32>,

    /// HTTP timeout in seconds.
    #[arg(long, global = true)]
    pub request_timeout_secs: Option<u64>,

    /// Keep or replace the other variant when re-adding an ID.
    #[arg(long, value_enum, global = true)]
    pub variant_policy: Option<VariantPolicy>,

    /// Enable desktop notifications.
    #[arg(long, global = true)]
    pub enable_desktop_notifications: Option<bool>,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Gallery operations.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Download an emoji by ID and add it to the gallery.
    Add {
        /// Numeric emoji ID.
        id: String,
        /// Fetch the animated variant and store it as GIF.
        #[arg(long)]
        gif: bool,
    },
    /// Remove entries by stored filename.
    Remove {
        /// Stored filenames, e.g. `123.webp`.
        #[arg(required = true)]
        filenames: Vec<String>,
    },
    /// List stored entries.
    List,
    /// Remove every entry.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Copy an entry's link to the clipboard.
    Copy {
        /// Stored filename, or an ID for static entries.
        key: String,
    },
    /// Print gallery locations.
    Paths,
}
