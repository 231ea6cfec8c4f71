use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Completion endpoint that refuses connections
#[allow(dead_code)]
pub const UNREACHABLE_API_BASE: &str = "http://127.0.0.1:1/v1";

/// Get a Command for obs
#[allow(dead_code)]
pub fn obs() -> Command {
    cargo_bin_cmd!("obs")
}

/// A scratch home with two vaults (`P` generic, `C` CRM), a backup root,
/// and a config file pointing at them
pub struct TestEnv {
    dir: TempDir,
    config_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Environment whose completion API is unreachable
    pub fn new() -> Self {
        Self::with_api_base(UNREACHABLE_API_BASE)
    }

    /// Environment whose completion API lives at `api_base`
    pub fn with_api_base(api_base: &str) -> Self {
        let env = Self::empty();
        let root = env.dir.path();
        let yaml = format!(
            "vaults:\n  P: '{}'\n  C: '{}'\n  G: '{}'\nopenai_api_key: sk-test\nbackup_dir: '{}'\napi_base: '{}'\n",
            root.join("personal").display(),
            root.join("crm").display(),
            root.join("gone").display(),
            root.join("backups").display(),
            api_base,
        );
        env.write_config(&yaml);
        env
    }

    /// Vault directories only; call `write_config` before running obs
    pub fn empty() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("personal")).unwrap();
        fs::create_dir(dir.path().join("crm")).unwrap();
        let config_path = dir.path().join("obs_config.yaml");
        Self { dir, config_path }
    }

    pub fn write_config(&self, yaml: &str) {
        fs::write(&self.config_path, yaml).unwrap();
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// obs with this environment's config and a clean process environment
    pub fn obs(&self) -> Command {
        let mut cmd = obs();
        cmd.env_remove("OPENAI_API_KEY")
            .env_remove("OBS_CONFIG")
            .env_remove("OBS_LOG")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(&self.config_path);
        cmd
    }

    /// Path of a note in the `personal` or `crm` vault directory
    pub fn note(&self, vault_dir: &str, name: &str) -> PathBuf {
        self.dir.path().join(vault_dir).join(format!("{}.md", name))
    }

    pub fn write_note(&self, vault_dir: &str, name: &str, content: &str) -> PathBuf {
        let path = self.note(vault_dir, name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn read_note(&self, vault_dir: &str, name: &str) -> String {
        fs::read_to_string(self.note(vault_dir, name)).unwrap()
    }

    /// Backup files written for a vault code
    pub fn backups(&self, code: &str) -> Vec<PathBuf> {
        match fs::read_dir(self.dir.path().join("backups").join(code)) {
            Ok(entries) => entries.map(|entry| entry.unwrap().path()).collect(),
            Err(_) => Vec::new(),
        }
    }
}
