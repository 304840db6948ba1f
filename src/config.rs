//! Runtime configuration from command line and environment

use std::path::PathBuf;
use std::time::Duration;

use crate::api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::share::ShareTarget;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("no API key: pass --api-key, --api-key-file or set OPENWEATHER_API_KEY")]
    MissingApiKey,
    #[error("could not read API key file {path}: {source}")]
    ReadKeyFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("API key file {0} has no key in it")]
    EmptyKeyFile(PathBuf),
    #[error("--share-command is empty")]
    EmptyShareCommand,
}

/// Flags shared by the binary and tests
#[derive(clap::Args, Debug, Clone)]
pub struct ConfigArgs {
    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Read the API key from a file kept out of version control
    #[arg(long, value_name = "PATH")]
    pub api_key_file: Option<PathBuf>,

    /// Provider base URL
    #[arg(long, env = "OPENWEATHER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds (minimum 1)
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs(), value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Program that receives shared text on stdin, e.g. "wl-copy" or "xclip -selection c"
    #[arg(long, value_name = "COMMAND")]
    pub share_command: Option<String>,

    /// File that shared text is appended to
    #[arg(long, value_name = "PATH")]
    pub share_file: Option<PathBuf>,

    /// Ring the terminal bell on submit and share
    #[arg(long)]
    pub bell: bool,

    /// Write logs here (RUST_LOG filters, default info)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Validated configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub share_targets: Vec<ShareTarget>,
    pub bell: bool,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn from_args(args: ConfigArgs) -> Result<Self, ConfigError> {
        let api_key = resolve_api_key(args.api_key, args.api_key_file)?;
        let share_targets = share_targets(args.share_command.as_deref(), args.share_file)?;

        Ok(Self {
            api_key,
            base_url: args.base_url,
            timeout: Duration::from_secs(args.timeout_secs),
            share_targets,
            bell: args.bell,
            log_file: args.log_file,
        })
    }
}

/// Flag/env value wins over the key file.
fn resolve_api_key(
    key: Option<String>,
    key_file: Option<PathBuf>,
) -> Result<String, ConfigError> {
    if let Some(key) = key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
        return Ok(key);
    }

    let Some(path) = key_file else {
        return Err(ConfigError::MissingApiKey);
    };
    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadKeyFile {
        path: path.clone(),
        source,
    })?;
    contents
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
        .ok_or(ConfigError::EmptyKeyFile(path))
}

/// Clipboard is always offered first, then the configured extras.
fn share_targets(
    command: Option<&str>,
    file: Option<PathBuf>,
) -> Result<Vec<ShareTarget>, ConfigError> {
    let mut targets = vec![ShareTarget::Clipboard];

    if let Some(command) = command {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(ConfigError::EmptyShareCommand)?;
        targets.push(ShareTarget::Command {
            program,
            args: parts.collect(),
        });
    }
    if let Some(path) = file {
        targets.push(ShareTarget::File(path));
    }

    Ok(targets)
}
