//! Timestamped note snapshots taken before every model-assisted edit
//!
//! Backups land at `{backup_root}/{vault_code}/{timestamp}-{filename}.md`
//! with a minute-resolution timestamp. They are write-once from obs's point
//! of view and never read back; recovery is manual.
//!
//! A backup failure never aborts the edit. The caller gets a
//! [`BackupOutcome`] and decides how loudly to report it.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{DateTime, Local};
use tracing::{debug, warn};

use crate::trace_time;
use crate::vault::{note_file_name, note_path};

/// `2025-01-22-T15-22`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-T%H-%M";

/// Result of a backup attempt. None of these stop the mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    /// Snapshot written
    Created { source: PathBuf, backup: PathBuf },
    /// Note does not exist yet, nothing to snapshot
    SkippedMissing { source: PathBuf },
    /// Reading the note or writing the snapshot failed
    Failed { source: PathBuf, reason: String },
}

/// Writes snapshots under a single backup root
#[derive(Debug, Clone)]
pub struct BackupManager {
    root: PathBuf,
}

impl BackupManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Snapshot `vault_root/filename.md` using the current local time
    pub fn backup(&self, vault_code: &str, vault_root: &Path, filename: &str) -> BackupOutcome {
        self.backup_at(vault_code, vault_root, filename, Local::now())
    }

    /// Snapshot `vault_root/filename.md`, stamping the backup with `now`.
    ///
    /// A snapshot taken in the same minute as an earlier one replaces it.
    #[tracing::instrument(skip(self, vault_root, now))]
    pub fn backup_at(
        &self,
        vault_code: &str,
        vault_root: &Path,
        filename: &str,
        now: DateTime<Local>,
    ) -> BackupOutcome {
        let start = Instant::now();
        let source = note_path(vault_root, filename);

        if !source.exists() {
            warn!(path = %source.display(), "cannot back up non-existing file");
            return BackupOutcome::SkippedMissing { source };
        }

        let content = match fs::read_to_string(&source) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %source.display(), error = %e, "error reading file for backup");
                return BackupOutcome::Failed {
                    source,
                    reason: format!("error reading file for backup: {}", e),
                };
            }
        };

        let vault_dir = self.root.join(vault_code);
        if let Err(e) = fs::create_dir_all(&vault_dir) {
            warn!(path = %vault_dir.display(), error = %e, "error creating backup directory");
            return BackupOutcome::Failed {
                source,
                reason: format!(
                    "error creating backup directory '{}': {}",
                    vault_dir.display(),
                    e
                ),
            };
        }

        let backup = vault_dir.join(backup_file_name(filename, now));
        if let Err(e) = fs::write(&backup, content) {
            warn!(path = %backup.display(), error = %e, "error writing backup file");
            return BackupOutcome::Failed {
                source,
                reason: format!("error writing backup file '{}': {}", backup.display(), e),
            };
        }

        debug!(backup = %backup.display(), "backup_written");
        trace_time!(start, "backup");

        BackupOutcome::Created { source, backup }
    }
}

/// `{timestamp}-{filename}.md`
pub fn backup_file_name(filename: &str, now: DateTime<Local>) -> String {
    format!(
        "{}-{}",
        now.format(TIMESTAMP_FORMAT),
        note_file_name(filename)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 1, 22, 15, 22, 41).unwrap()
    }

    #[test]
    fn test_backup_file_name_has_minute_resolution() {
        assert_eq!(
            backup_file_name("MyNote", fixed_time()),
            "2025-01-22-T15-22-MyNote.md"
        );
    }

    #[test]
    fn test_backup_copies_content_exactly() {
        let vault = tempdir().unwrap();
        let backups = tempdir().unwrap();
        let content = "# Title\n\nbody with trailing spaces   \n";
        fs::write(vault.path().join("Note.md"), content).unwrap();

        let manager = BackupManager::new(backups.path());
        let outcome = manager.backup_at("P", vault.path(), "Note", fixed_time());

        let expected = backups.path().join("P").join("2025-01-22-T15-22-Note.md");
        assert_eq!(
            outcome,
            BackupOutcome::Created {
                source: vault.path().join("Note.md"),
                backup: expected.clone(),
            }
        );
        assert_eq!(fs::read_to_string(expected).unwrap(), content);
    }

    #[test]
    fn test_backup_missing_note_is_noop() {
        let vault = tempdir().unwrap();
        let backups = tempdir().unwrap();

        let manager = BackupManager::new(backups.path());
        let outcome = manager.backup("P", vault.path(), "Ghost");

        assert!(matches!(outcome, BackupOutcome::SkippedMissing { .. }));
        assert!(!backups.path().join("P").exists());
    }

    #[test]
    fn test_same_minute_backup_replaces_earlier_one() {
        let vault = tempdir().unwrap();
        let backups = tempdir().unwrap();
        let note = vault.path().join("Note.md");
        let manager = BackupManager::new(backups.path());

        fs::write(&note, "first").unwrap();
        manager.backup_at("P", vault.path(), "Note", fixed_time());
        fs::write(&note, "second").unwrap();
        let outcome = manager.backup_at("P", vault.path(), "Note", fixed_time());

        let BackupOutcome::Created { backup, .. } = outcome else {
            panic!("expected backup to be created");
        };
        assert_eq!(fs::read_to_string(backup).unwrap(), "second");
        assert_eq!(fs::read_dir(backups.path().join("P")).unwrap().count(), 1);
    }

    #[test]
    fn test_backup_dir_unwritable_is_reported_not_fatal() {
        let vault = tempdir().unwrap();
        let scratch = tempdir().unwrap();
        fs::write(vault.path().join("Note.md"), "content").unwrap();

        // A regular file where the backup root should be
        let blocker = scratch.path().join("blocked");
        fs::write(&blocker, "").unwrap();

        let manager = BackupManager::new(&blocker);
        let outcome = manager.backup("P", vault.path(), "Note");

        match outcome {
            BackupOutcome::Failed { source, reason } => {
                assert_eq!(source, vault.path().join("Note.md"));
                assert!(reason.contains("backup directory"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
