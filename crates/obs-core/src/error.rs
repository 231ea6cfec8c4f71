//! Error types and exit codes for obs
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure (generation, IO)
//! - 2: Usage error (bad flags/args)
//! - 3: Data/config error (unknown vault, missing note, missing config)

use std::path::PathBuf;
use thiserror::Error;

mod macros;

/// Exit codes reported by the `obs` binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data/config error - unknown vault, missing note (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur during obs operations
#[derive(Error, Debug)]
pub enum ObsError {
    // Usage errors (exit code 2)
    #[error("{0}")]
    UsageError(String),

    // Data/config errors (exit code 3)
    #[error("config file not found at {path:?}")]
    ConfigNotFound { path: PathBuf },

    #[error("invalid config in {path:?}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("vault code '{code}' not found in config")]
    UnknownVault { code: String },

    #[error("vault path {path:?} does not exist on disk")]
    VaultPathMissing { path: PathBuf },

    #[error("no OpenAI API key found in config or OPENAI_API_KEY")]
    MissingCredential,

    #[error("no 'backup_dir' specified in config")]
    MissingBackupConfig,

    #[error("file {path:?} already exists")]
    NoteAlreadyExists { path: PathBuf },

    #[error("file {path:?} does not exist")]
    NoteNotFound { path: PathBuf },

    // Generic failures (exit code 1)
    #[error("generation failed: {0}")]
    GenerationFailure(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl ObsError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ObsError::UsageError(_) => ExitCode::Usage,

            ObsError::ConfigNotFound { .. }
            | ObsError::InvalidConfig { .. }
            | ObsError::UnknownVault { .. }
            | ObsError::VaultPathMissing { .. }
            | ObsError::MissingCredential
            | ObsError::MissingBackupConfig
            | ObsError::NoteAlreadyExists { .. }
            | ObsError::NoteNotFound { .. } => ExitCode::Data,

            ObsError::GenerationFailure(_)
            | ObsError::Io(_)
            | ObsError::Other(_) => ExitCode::Failure,
        }
    }

    /// Wrap a failure from the completion service
    pub fn generation(err: impl std::fmt::Display) -> Self {
        ObsError::GenerationFailure(err.to_string())
    }
}

/// Result type alias for obs operations
pub type Result<T> = std::result::Result<T, ObsError>;
