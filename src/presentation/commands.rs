//! Command-line front end for the gallery.

use std::io::{self, BufRead, Write};

use crate::application::{GalleryService, OperationOutcome};
use crate::domain::entities::{DisplayHandle, GalleryEvent};
use crate::infrastructure::config::Command;

/// Executes `command` and writes its output to `out`.
///
/// Reads the clear-all confirmation from `input` unless `--yes` was given.
/// Returns whether the command succeeded.
///
/// # Errors
/// Returns I/O errors from reading `input` or writing `out`.
pub async fn run_command<R: BufRead, W: Write>(
    service: &mut GalleryService,
    command: Command,
    input: &mut R,
    out: &mut W,
) -> io::Result<bool> {
    let outcome = match command {
        Command::Add { id, gif } => service.add(&id, gif).await,
        Command::Remove { filenames } => service.remove_selection(&filenames),
        Command::Clear { yes } => {
            if service.store().is_empty() {
                OperationOutcome::NoOp("Gallery is already empty.".to_string())
            } else if yes || confirm(input, out, "Remove all items from gallery?")? {
                service.clear_all()
            } else {
                OperationOutcome::NoOp("Clear cancelled.".to_string())
            }
        }
        Command::Copy { key } => service.copy(&key),
        Command::List => {
            let handles = service.handles();
            render_gallery(out, &handles)?;
            OperationOutcome::NoOp(format!("{} item(s).", handles.len()))
        }
        Command::Paths => {
            let store = service.store();
            writeln!(out, "gallery   {}", store.base_dir().display())?;
            writeln!(out, "images    {}", store.images_dir().display())?;
            writeln!(out, "metadata  {}", store.metadata_path().display())?;
            return Ok(true);
        }
    };

    for event in service.drain_events() {
        render_event(out, &event)?;
    }
    writeln!(out, "{outcome}")?;

    Ok(outcome.is_success())
}

fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> io::Result<bool> {
    write!(out, "{question} [y/N] ")?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
}

/// Writes one line per entry: filename, kind, label and image path.
///
/// # Errors
/// Returns I/O errors from `out`.
pub fn render_gallery<W: Write>(out: &mut W, handles: &[DisplayHandle]) -> io::Result<()> {
    let width = handles
        .iter()
        .map(|h| h.filename.len())
        .max()
        .unwrap_or(0);

    for handle in handles {
        writeln!(
            out,
            "{:<width$}  {:<8}  {}  {}",
            handle.filename,
            handle.kind.to_string(),
            handle.display_text,
            handle.path.display(),
        )?;
    }
    Ok(())
}

/// Writes a one-line description of a store event.
///
/// # Errors
/// Returns I/O errors from `out`.
pub fn render_event<W: Write>(out: &mut W, event: &GalleryEvent) -> io::Result<()> {
    match event {
        GalleryEvent::EntryAdded(handle) => {
            writeln!(out, "+ {} ({}) {}", handle.filename, handle.kind, handle.path.display())
        }
        GalleryEvent::EntryRemoved { filename, .. } => writeln!(out, "- {filename}"),
        GalleryEvent::EntriesCleared { count } => writeln!(out, "- {count} item(s)"),
        GalleryEvent::EntriesLoaded { .. } => Ok(()),
    }
}
