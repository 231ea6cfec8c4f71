//! Note mutations: create, append, insert
//!
//! Every mutation reads the whole note, computes the whole new content, and
//! writes it back in a single overwrite. Any failure before the write leaves
//! the note untouched.

pub mod template;

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use crate::error::{ObsError, Result};
use crate::generation::{prompts, Generator};
use crate::trace_time;
use crate::vault::note_path;

pub use template::{render_person, PERSON_SECTIONS, PERSON_TEMPLATE};

/// Framing used by [`insert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertMode {
    /// Generic editing framing, no exemplar
    Generic,
    /// CRM framing with the contact exemplar
    Crm,
}

/// Create `vault_root/filename.md` containing exactly `content`.
///
/// Fails with [`ObsError::NoteAlreadyExists`] rather than overwrite.
#[tracing::instrument(skip(vault_root, content), fields(bytes = content.len()))]
pub fn create(vault_root: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let path = note_path(vault_root, filename);
    write_new(&path, content)?;
    info!(path = %path.display(), "note_created");
    Ok(path)
}

/// Create a contact record from the person template, titled `filename`
#[tracing::instrument(skip(vault_root))]
pub fn create_person(vault_root: &Path, filename: &str) -> Result<PathBuf> {
    let path = note_path(vault_root, filename);
    write_new(&path, &render_person(filename))?;
    info!(path = %path.display(), "person_created");
    Ok(path)
}

/// Append generated text to an existing note.
///
/// The note becomes `current + "\n" + generated`.
#[tracing::instrument(skip(vault_root, instruction, generator))]
pub fn append(
    vault_root: &Path,
    filename: &str,
    instruction: &str,
    generator: &dyn Generator,
) -> Result<PathBuf> {
    let start = Instant::now();
    let path = note_path(vault_root, filename);
    let current = read_existing(&path)?;

    debug!(bytes = current.len(), "append_pending");
    let generated = generator.complete(&prompts::append_messages(&current, instruction))?;
    trace_time!(start, "append_generated");

    fs::write(&path, format!("{}\n{}", current, generated))?;
    info!(path = %path.display(), "append_committed");
    Ok(path)
}

/// Replace an existing note with a generated revision.
///
/// The generator returns the entire document, which overwrites the note
/// verbatim.
#[tracing::instrument(skip(vault_root, instruction, generator))]
pub fn insert(
    vault_root: &Path,
    filename: &str,
    instruction: &str,
    generator: &dyn Generator,
    mode: InsertMode,
) -> Result<PathBuf> {
    let start = Instant::now();
    let path = note_path(vault_root, filename);
    let current = read_existing(&path)?;

    debug!(bytes = current.len(), "insert_pending");
    let messages = match mode {
        InsertMode::Generic => prompts::insert_messages(&current, instruction),
        InsertMode::Crm => prompts::crm_insert_messages(filename, &current, instruction),
    };
    let revised = generator.complete(&messages)?;
    trace_time!(start, "insert_generated");

    fs::write(&path, revised)?;
    info!(path = %path.display(), "insert_committed");
    Ok(path)
}

fn read_existing(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(ObsError::NoteNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(fs::read_to_string(path)?)
}

fn write_new(path: &Path, content: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => ObsError::NoteAlreadyExists {
                path: path.to_path_buf(),
            },
            _ => ObsError::Io(e),
        })?;
    fill_new(&mut file, path, content)
}

/// Write a freshly created note; a partial write is removed so the name
/// stays free for the next create
fn fill_new(writer: &mut impl Write, path: &Path, content: &str) -> Result<()> {
    if let Err(e) = writer.write_all(content.as_bytes()).and_then(|()| writer.flush()) {
        let _ = fs::remove_file(path);
        return Err(ObsError::Io(e));
    }
    Ok(())
}
