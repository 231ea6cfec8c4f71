//! Configuration for obs
//!
//! Configuration lives in a single YAML file (`~/.obs_config.yaml` by
//! default). It is loaded once at startup into a [`Config`] that is passed
//! by reference to the dispatcher.

pub mod types;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ObsError, Result};
use crate::vault::{Vault, VaultProfile};

pub use types::{
    Config, GenerationConfig, DEFAULT_API_BASE, DEFAULT_CRM_VAULT, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE,
};

const CONFIG_FILE: &str = ".obs_config.yaml";
const CONFIG_PATH_ENV_VAR: &str = "OBS_CONFIG";
const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

impl Config {
    /// Default config location: `$OBS_CONFIG`, else `~/.obs_config.yaml`
    pub fn default_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV_VAR) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }

        dirs::home_dir()
            .map(|home| home.join(CONFIG_FILE))
            .ok_or_else(|| ObsError::Other("unable to determine home directory".to_string()))
    }

    /// Load configuration from a file.
    ///
    /// A missing `openai_api_key` falls back to the `OPENAI_API_KEY`
    /// environment variable.
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ObsError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path)?;
        let mut config = Self::from_yaml_str(&content).map_err(|e| ObsError::InvalidConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if config.api_key().is_none() {
            config.openai_api_key = std::env::var(API_KEY_ENV_VAR).ok();
        }

        tracing::debug!(vaults = config.vaults.len(), "config_loaded");
        Ok(config)
    }

    /// Parse configuration from YAML text without touching the environment
    pub fn from_yaml_str(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Resolve a vault code to a vault whose root exists on disk
    pub fn resolve_vault(&self, code: &str) -> Result<Vault> {
        let raw = self.vaults.get(code).ok_or_else(|| ObsError::UnknownVault {
            code: code.to_string(),
        })?;

        let root = expand_home(raw);
        if !root.exists() {
            return Err(ObsError::VaultPathMissing { path: root });
        }

        Ok(Vault::new(code, root))
    }

    /// Route a vault code to its note profile
    pub fn profile_for(&self, code: &str) -> VaultProfile {
        if code.eq_ignore_ascii_case(&self.crm_vault) {
            VaultProfile::Crm
        } else {
            VaultProfile::Generic
        }
    }

    /// Backup root, required before any mutating action
    pub fn require_backup_dir(&self) -> Result<PathBuf> {
        self.backup_dir
            .as_deref()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(expand_home)
            .ok_or(ObsError::MissingBackupConfig)
    }

    /// API credential, required before any generation call
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key().ok_or(ObsError::MissingCredential)
    }

    fn api_key(&self) -> Option<&str> {
        self.openai_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// Expand a leading `~` to the user's home directory
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
