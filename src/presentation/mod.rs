//! Presentation layer: command-line rendering of the gallery.

pub mod commands;

pub use commands::{render_event, render_gallery, run_command};
