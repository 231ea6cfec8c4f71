//! CLI argument parsing for obs
//!
//! `obs <vault_code> <create|append|insert> [filename] [text...]`
//!
//! A leading text word that matches a flag (`-v`, `-q`) is parsed as that
//! flag; `--` ends flag parsing.

pub mod parse;

use clap::Parser;
use std::path::PathBuf;

use obs_core::dispatch::{Action, Request};
use parse::parse_action;

/// Create notes in a vault, or append/insert LLM-generated content into them
#[derive(Parser, Debug)]
#[command(name = "obs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.obs_config.yaml)
    #[arg(long, env = "OBS_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,

    /// Log level filter (e.g. debug, trace, or a full directive)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Vault code from the config file
    pub vault: String,

    /// Action to perform: create, append, or insert
    #[arg(value_parser = parse_action)]
    pub action: Action,

    /// Note filename, without the .md extension
    pub filename: Option<String>,

    /// Initial content for create, or the instruction for append/insert.
    /// Put `--` before text whose first word looks like an obs flag
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub text: Vec<String>,
}

impl Cli {
    /// Build the dispatcher request; trailing words are joined by spaces
    pub fn request(&self) -> Request {
        Request {
            vault_code: self.vault.clone(),
            action: self.action,
            filename: self.filename.clone().unwrap_or_default(),
            text: self.text.join(" "),
        }
    }
}
