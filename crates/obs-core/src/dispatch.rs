//! Validate a request and sequence backup -> mutation
//!
//! The dispatcher is the only component that knows the order of
//! operations:
//! 1. Resolve the vault (`UnknownVault`, `VaultPathMissing`)
//! 2. Check the action's required inputs
//! 3. For append/insert: backup root, credential, backup, then mutation
//! 4. For create: mutation only
//!
//! Concurrent invocations on the same note are not coordinated.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use tracing::debug;

use crate::backup::{BackupManager, BackupOutcome};
use crate::bail_usage;
use crate::config::Config;
use crate::error::{ObsError, Result};
use crate::generation::Generator;
use crate::note::{self, InsertMode};
use crate::trace_time;
use crate::vault::VaultProfile;

/// Operation requested on a note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Append,
    Insert,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Append => "append",
            Action::Insert => "insert",
        }
    }

    /// Whether the action rewrites an existing note
    pub fn is_mutating(&self) -> bool {
        matches!(self, Action::Append | Action::Insert)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ObsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "create" => Ok(Action::Create),
            "append" => Ok(Action::Append),
            "insert" => Ok(Action::Insert),
            other => Err(ObsError::UsageError(format!(
                "unrecognized action '{}'. Use create, append, or insert.",
                other
            ))),
        }
    }
}

/// One command: a vault, an action, a note, and free text
///
/// For create the text is the initial content; for append/insert it is the
/// instruction passed to the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub vault_code: String,
    pub action: Action,
    pub filename: String,
    pub text: String,
}

/// What a successful command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created {
        path: PathBuf,
    },
    Appended {
        path: PathBuf,
        backup: BackupOutcome,
    },
    Inserted {
        path: PathBuf,
        backup: BackupOutcome,
    },
}

/// Routes requests against a loaded configuration
pub struct Dispatcher<'a> {
    config: &'a Config,
    on_backup: Option<Box<dyn Fn(&BackupOutcome) + 'a>>,
}

impl<'a> Dispatcher<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            on_backup: None,
        }
    }

    /// Observe the backup outcome as soon as the backup step finishes,
    /// before the mutation runs and whether or not it succeeds
    pub fn on_backup(mut self, observer: impl Fn(&BackupOutcome) + 'a) -> Self {
        self.on_backup = Some(Box::new(observer));
        self
    }

    /// Run one request.
    ///
    /// `connect` builds the generator from the credential. It is only
    /// called for append/insert, after the credential check passes.
    #[tracing::instrument(skip(self, request, connect), fields(vault = %request.vault_code, action = %request.action, filename = %request.filename))]
    pub fn execute<G, F>(&self, request: &Request, connect: F) -> Result<Outcome>
    where
        G: Generator,
        F: FnOnce(&Config, &str) -> G,
    {
        let start = Instant::now();
        let vault = self.config.resolve_vault(&request.vault_code)?;
        let profile = self.config.profile_for(vault.code());
        debug!(root = %vault.root().display(), ?profile, "vault_resolved");

        if request.filename.is_empty() {
            bail_usage!(format!(
                "usage: obs [vault] {} [filename] {}",
                request.action,
                match request.action {
                    Action::Create => "(optional content)",
                    Action::Append | Action::Insert => "[instruction]",
                }
            ));
        }

        if !request.action.is_mutating() {
            let path = match profile {
                VaultProfile::Crm => note::create_person(vault.root(), &request.filename)?,
                VaultProfile::Generic => {
                    note::create(vault.root(), &request.filename, &request.text)?
                }
            };
            trace_time!(start, "dispatch");
            return Ok(Outcome::Created { path });
        }

        if request.text.is_empty() {
            bail_usage!(format!(
                "usage: obs [vault] {} [filename] [instruction]",
                request.action
            ));
        }

        let backups = BackupManager::new(self.config.require_backup_dir()?);
        let api_key = self.config.require_api_key()?;
        let generator = connect(self.config, api_key);

        // Snapshot strictly before the mutator reads the note
        let backup = backups.backup(vault.code(), vault.root(), &request.filename);
        if let Some(observer) = &self.on_backup {
            observer(&backup);
        }

        let outcome = if request.action == Action::Append {
            let path = note::append(vault.root(), &request.filename, &request.text, &generator)?;
            Outcome::Appended { path, backup }
        } else {
            let mode = match profile {
                VaultProfile::Crm => InsertMode::Crm,
                VaultProfile::Generic => InsertMode::Generic,
            };
            let path = note::insert(
                vault.root(),
                &request.filename,
                &request.text,
                &generator,
                mode,
            )?;
            Outcome::Inserted { path, backup }
        };

        trace_time!(start, "dispatch");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::ChatMessage;
    use std::cell::Cell;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    struct Fixed(&'static str);

    impl Generator for Fixed {
        fn complete(&self, _messages: &[ChatMessage]) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct Broken;

    impl Generator for Broken {
        fn complete(&self, _messages: &[ChatMessage]) -> Result<String> {
            Err(ObsError::generation("connection refused"))
        }
    }

    struct Fixture {
        vaults: TempDir,
        backups: TempDir,
        config: Config,
    }

    impl Fixture {
        fn new() -> Self {
            let vaults = tempdir().unwrap();
            let backups = tempdir().unwrap();
            fs::create_dir(vaults.path().join("personal")).unwrap();
            fs::create_dir(vaults.path().join("crm")).unwrap();

            let mut config = Config::default();
            config
                .vaults
                .insert("P".to_string(), vaults.path().join("personal"));
            config
                .vaults
                .insert("C".to_string(), vaults.path().join("crm"));
            config
                .vaults
                .insert("G".to_string(), vaults.path().join("gone"));
            config.backup_dir = Some(backups.path().to_path_buf());
            config.openai_api_key = Some("sk-test".to_string());

            Self {
                vaults,
                backups,
                config,
            }
        }

        fn note(&self, vault: &str, name: &str) -> PathBuf {
            self.vaults.path().join(vault).join(format!("{}.md", name))
        }

        fn backup_files(&self, code: &str) -> Vec<PathBuf> {
            match fs::read_dir(self.backups.path().join(code)) {
                Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
                Err(_) => Vec::new(),
            }
        }
    }

    fn request(vault: &str, action: Action, filename: &str, text: &str) -> Request {
        Request {
            vault_code: vault.to_string(),
            action,
            filename: filename.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_action_parsing() {
        assert_eq!("create".parse::<Action>().unwrap(), Action::Create);
        assert_eq!("APPEND".parse::<Action>().unwrap(), Action::Append);
        assert_eq!("Insert".parse::<Action>().unwrap(), Action::Insert);
        assert!(matches!(
            "delete".parse::<Action>(),
            Err(ObsError::UsageError(_))
        ));
        assert!(Action::Append.is_mutating());
        assert!(!Action::Create.is_mutating());
    }

    #[test]
    fn test_unknown_vault() {
        let fx = Fixture::new();
        let err = Dispatcher::new(&fx.config)
            .execute(&request("Z", Action::Create, "N", ""), |_, _| Fixed(""))
            .unwrap_err();
        assert!(matches!(err, ObsError::UnknownVault { .. }));
    }

    #[test]
    fn test_vault_path_missing() {
        let fx = Fixture::new();
        let err = Dispatcher::new(&fx.config)
            .execute(&request("G", Action::Create, "N", ""), |_, _| Fixed(""))
            .unwrap_err();
        assert!(matches!(err, ObsError::VaultPathMissing { .. }));
    }

    #[test]
    fn test_create_generic_without_credential_or_backup_dir() {
        let mut fx = Fixture::new();
        fx.config.openai_api_key = None;
        fx.config.backup_dir = None;

        let outcome = Dispatcher::new(&fx.config)
            .execute(
                &request("P", Action::Create, "Idea", "first line"),
                |_, _| -> Fixed { panic!("create must not connect") },
            )
            .unwrap();

        assert_eq!(outcome, Outcome::Created { path: fx.note("personal", "Idea") });
        assert_eq!(
            fs::read_to_string(fx.note("personal", "Idea")).unwrap(),
            "first line"
        );
    }

    #[test]
    fn test_create_in_crm_vault_ignores_content() {
        let fx = Fixture::new();
        Dispatcher::new(&fx.config)
            .execute(
                &request("C", Action::Create, "Alice", "ignored text"),
                |_, _| Fixed(""),
            )
            .unwrap();

        let content = fs::read_to_string(fx.note("crm", "Alice")).unwrap();
        assert!(content.starts_with("# Alice\n"));
        assert!(!content.contains("ignored text"));
    }

    #[test]
    fn test_create_existing_note_fails() {
        let fx = Fixture::new();
        fs::write(fx.note("personal", "Idea"), "old").unwrap();
        let err = Dispatcher::new(&fx.config)
            .execute(&request("P", Action::Create, "Idea", "new"), |_, _| {
                Fixed("")
            })
            .unwrap_err();
        assert!(matches!(err, ObsError::NoteAlreadyExists { .. }));
        assert_eq!(fs::read_to_string(fx.note("personal", "Idea")).unwrap(), "old");
    }

    #[test]
    fn test_append_backs_up_then_mutates() {
        let fx = Fixture::new();
        fs::write(fx.note("personal", "Log"), "A").unwrap();

        let outcome = Dispatcher::new(&fx.config)
            .execute(&request("P", Action::Append, "Log", "add B"), |_, _| {
                Fixed("B")
            })
            .unwrap();

        assert_eq!(fs::read_to_string(fx.note("personal", "Log")).unwrap(), "A\nB");
        assert!(matches!(
            outcome,
            Outcome::Appended {
                backup: BackupOutcome::Created { .. },
                ..
            }
        ));

        let files = fx.backup_files("P");
        assert_eq!(files.len(), 1);
        assert_eq!(fs::read_to_string(&files[0]).unwrap(), "A");
        assert!(files[0]
            .file_name()
            .unwrap()
            .to_string_lossy()
            .ends_with("-Log.md"));
    }

    #[test]
    fn test_failed_backup_does_not_stop_the_edit() {
        let mut fx = Fixture::new();
        fs::write(fx.note("personal", "Log"), "A").unwrap();

        // A regular file where the backup root should be
        let blocker = fx.backups.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();
        fx.config.backup_dir = Some(blocker);

        let outcome = Dispatcher::new(&fx.config)
            .execute(&request("P", Action::Append, "Log", "add B"), |_, _| {
                Fixed("B")
            })
            .unwrap();

        assert!(matches!(
            outcome,
            Outcome::Appended {
                backup: BackupOutcome::Failed { .. },
                ..
            }
        ));
        assert_eq!(fs::read_to_string(fx.note("personal", "Log")).unwrap(), "A\nB");
    }

    #[test]
    fn test_insert_replaces_and_routes_crm() {
        let fx = Fixture::new();
        fs::write(fx.note("crm", "Alice"), "# Alice").unwrap();
        fs::write(fx.note("personal", "Doc"), "old doc").unwrap();

        Dispatcher::new(&fx.config)
            .execute(&request("C", Action::Insert, "Alice", "likes tea"), |_, _| {
                Fixed("Z")
            })
            .unwrap();
        Dispatcher::new(&fx.config)
            .execute(&request("P", Action::Insert, "Doc", "rewrite"), |_, _| {
                Fixed("Y")
            })
            .unwrap();

        assert_eq!(fs::read_to_string(fx.note("crm", "Alice")).unwrap(), "Z");
        assert_eq!(fs::read_to_string(fx.note("personal", "Doc")).unwrap(), "Y");
        assert_eq!(fx.backup_files("C").len(), 1);
        assert_eq!(fx.backup_files("P").len(), 1);
    }

    #[test]
    fn test_missing_note_writes_nothing() {
        let fx = Fixture::new();
        for action in [Action::Append, Action::Insert] {
            let err = Dispatcher::new(&fx.config)
                .execute(&request("P", action, "Ghost", "x"), |_, _| Fixed("B"))
                .unwrap_err();
            assert!(matches!(err, ObsError::NoteNotFound { .. }));
        }
        assert!(!fx.note("personal", "Ghost").exists());
        assert!(fx.backup_files("P").is_empty());
    }

    #[test]
    fn test_generation_failure_keeps_note_and_backup() {
        let fx = Fixture::new();
        fs::write(fx.note("personal", "Keep"), "original").unwrap();

        for action in [Action::Append, Action::Insert] {
            let err = Dispatcher::new(&fx.config)
                .execute(&request("P", action, "Keep", "x"), |_, _| Broken)
                .unwrap_err();
            assert!(matches!(err, ObsError::GenerationFailure(_)));
            assert_eq!(
                fs::read_to_string(fx.note("personal", "Keep")).unwrap(),
                "original"
            );
        }
        assert!(!fx.backup_files("P").is_empty());
    }

    #[test]
    fn test_mutation_requires_backup_dir_and_credential() {
        let mut fx = Fixture::new();
        fs::write(fx.note("personal", "Log"), "A").unwrap();

        fx.config.backup_dir = None;
        let err = Dispatcher::new(&fx.config)
            .execute(&request("P", Action::Append, "Log", "x"), |_, _| Fixed("B"))
            .unwrap_err();
        assert!(matches!(err, ObsError::MissingBackupConfig));

        fx.config.backup_dir = Some(fx.backups.path().to_path_buf());
        fx.config.openai_api_key = None;
        let err = Dispatcher::new(&fx.config)
            .execute(&request("P", Action::Insert, "Log", "x"), |_, _| Fixed("B"))
            .unwrap_err();
        assert!(matches!(err, ObsError::MissingCredential));

        assert_eq!(fs::read_to_string(fx.note("personal", "Log")).unwrap(), "A");
        assert!(fx.backup_files("P").is_empty());
    }

    #[test]
    fn test_backup_observer_sees_outcome_before_failure() {
        let fx = Fixture::new();
        fs::write(fx.note("personal", "Keep"), "original").unwrap();
        let observed = std::cell::RefCell::new(Vec::new());

        let result = Dispatcher::new(&fx.config)
            .on_backup(|backup| observed.borrow_mut().push(backup.clone()))
            .execute(&request("P", Action::Append, "Keep", "x"), |_, _| Broken);

        assert!(result.is_err());
        let observed = observed.borrow();
        assert_eq!(observed.len(), 1);
        assert!(matches!(observed[0], BackupOutcome::Created { .. }));
    }

    #[test]
    fn test_connect_receives_credential() {
        let fx = Fixture::new();
        fs::write(fx.note("personal", "Log"), "A").unwrap();
        let connected = Cell::new(false);

        Dispatcher::new(&fx.config)
            .execute(&request("P", Action::Append, "Log", "x"), |config, key| {
                assert_eq!(key, "sk-test");
                assert_eq!(config.generation.model, "gpt-4o");
                connected.set(true);
                Fixed("B")
            })
            .unwrap();

        assert!(connected.get());
    }

    #[test]
    fn test_missing_inputs_are_usage_errors() {
        let fx = Fixture::new();
        fs::write(fx.note("personal", "Log"), "A").unwrap();

        let err = Dispatcher::new(&fx.config)
            .execute(&request("P", Action::Create, "", "x"), |_, _| Fixed(""))
            .unwrap_err();
        assert!(matches!(err, ObsError::UsageError(_)));

        let err = Dispatcher::new(&fx.config)
            .execute(&request("P", Action::Append, "Log", ""), |_, _| Fixed(""))
            .unwrap_err();
        assert!(matches!(err, ObsError::UsageError(_)));
        assert!(fx.backup_files("P").is_empty());
    }
}
