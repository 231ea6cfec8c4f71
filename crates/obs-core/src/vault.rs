//! Vaults: named root directories of Markdown notes

use std::path::{Path, PathBuf};

/// Extension shared by every note and backup file
pub const NOTE_EXTENSION: &str = "md";

/// A vault resolved from configuration and verified to exist on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vault {
    code: String,
    root: PathBuf,
}

/// How notes in a vault are created and edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultProfile {
    /// Plain notes: create with caller content, generic insert framing
    Generic,
    /// Contact records: person template on create, exemplar-guided insert
    Crm,
}

impl Vault {
    pub fn new(code: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            code: code.into(),
            root: root.into(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the note `filename` inside this vault
    pub fn note_path(&self, filename: &str) -> PathBuf {
        note_path(&self.root, filename)
    }
}

/// `{root}/{filename}.md`
pub fn note_path(root: &Path, filename: &str) -> PathBuf {
    root.join(note_file_name(filename))
}

/// `{filename}.md`
pub fn note_file_name(filename: &str) -> String {
    format!("{}.{}", filename, NOTE_EXTENSION)
}
