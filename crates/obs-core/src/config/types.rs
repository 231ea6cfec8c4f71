//! Configuration types for obs

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Vault code routed to the CRM profile unless configured otherwise
pub const DEFAULT_CRM_VAULT: &str = "C";

/// Chat completion model used for append/insert
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Sampling temperature sent with every completion request
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// Base URL of the OpenAI-compatible API
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Top-level configuration, read once per invocation from `~/.obs_config.yaml`
///
/// ```yaml
/// vaults:
///   P: ~/notes/personal
///   C: ~/notes/crm
/// openai_api_key: sk-xxxxx
/// backup_dir: ~/notes/.backups
/// model: gpt-4o
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Vault code -> vault root directory
    #[serde(default)]
    pub vaults: BTreeMap<String, PathBuf>,

    /// Credential for the completion API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,

    /// Root under which per-vault backups are written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<PathBuf>,

    /// Vault code whose notes are CRM contact records
    #[serde(default = "default_crm_vault")]
    pub crm_vault: String,

    /// Completion request settings, read from top-level keys
    #[serde(flatten)]
    pub generation: GenerationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vaults: BTreeMap::new(),
            openai_api_key: None,
            backup_dir: None,
            crm_vault: default_crm_vault(),
            generation: GenerationConfig::default(),
        }
    }
}

/// Settings for the chat completion call (`model`, `temperature`, `api_base`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            api_base: default_api_base(),
        }
    }
}

fn default_crm_vault() -> String {
    DEFAULT_CRM_VAULT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}
