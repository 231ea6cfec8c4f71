//! Human-readable progress lines
//!
//! Successes go to stdout and are silenced by `--quiet`. Backup problems go
//! to stderr; a failed backup is reported even in quiet mode since the edit
//! proceeds without one.

use std::path::Path;

use obs_core::backup::BackupOutcome;
use obs_core::dispatch::Outcome;

pub fn backup(outcome: &BackupOutcome, quiet: bool) {
    let line = backup_line(outcome);
    match outcome {
        BackupOutcome::Created { .. } if !quiet => println!("{}", line),
        BackupOutcome::SkippedMissing { .. } if !quiet => eprintln!("{}", line),
        BackupOutcome::Failed { .. } => eprintln!("{}", line),
        _ => {}
    }
}

pub fn outcome(outcome: &Outcome, quiet: bool) {
    if !quiet {
        println!("{}", outcome_line(outcome));
    }
}

fn backup_line(outcome: &BackupOutcome) -> String {
    match outcome {
        BackupOutcome::Created { source, backup } => format!(
            "Backed up '{}' to '{}'",
            file_name(source),
            backup.display()
        ),
        BackupOutcome::SkippedMissing { source } => format!(
            "Warning: Cannot back up non-existing file '{}'.",
            source.display()
        ),
        BackupOutcome::Failed { reason, .. } => {
            format!("Warning: backup failed, editing without one: {}", reason)
        }
    }
}

fn outcome_line(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Created { path } => format!("Created file at: {}", path.display()),
        Outcome::Appended { path, .. } => {
            format!("Appended content and updated file at: {}", path.display())
        }
        Outcome::Inserted { path, .. } => {
            format!("Inserted content and updated file at: {}", path.display())
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
