// ABOUTME: Runtime settings for the binary cache and network retries
// ABOUTME: Merges CLI flags, environment variables, and an optional TOML file

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const BIN_DIR_ENV: &str = "SQLDEF_BIN_DIR";
pub const RETRIES_ENV: &str = "SQLDEF_RETRIES";

const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// Contents of a settings file; every key is optional
///
/// ```toml
/// bin_dir = "/opt/sqldef"
/// retries = 3
/// retry_delay_ms = 500
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    pub bin_dir: Option<PathBuf>,
    pub retries: Option<u32>,
    pub retry_delay_ms: Option<u64>,
}

/// Values given explicitly on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bin_dir: Option<PathBuf>,
    pub retries: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Directory holding downloaded sqldef binaries
    pub bin_dir: PathBuf,
    /// Extra attempts for failed network requests
    pub retries: u32,
    pub retry_delay: Duration,
}

impl Settings {
    /// Resolve settings from CLI overrides, the process environment, and `config_path`
    pub fn load(overrides: Overrides, config_path: Option<&Path>) -> Result<Self> {
        let file = match config_path {
            Some(path) => load_file(path)?,
            None => FileSettings::default(),
        };
        let env = Overrides {
            bin_dir: std::env::var_os(BIN_DIR_ENV).map(PathBuf::from),
            retries: match std::env::var(RETRIES_ENV) {
                Ok(value) => Some(
                    value
                        .parse()
                        .with_context(|| format!("Invalid {}: {}", RETRIES_ENV, value))?,
                ),
                Err(_) => None,
            },
        };
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;

        Ok(Self::merge(overrides, env, file, cwd))
    }

    /// First non-empty value wins: CLI, then environment, then file, then default
    pub fn merge(cli: Overrides, env: Overrides, file: FileSettings, cwd: PathBuf) -> Self {
        Self {
            bin_dir: cli.bin_dir.or(env.bin_dir).or(file.bin_dir).unwrap_or(cwd),
            retries: cli.retries.or(env.retries).or(file.retries).unwrap_or(0),
            retry_delay: Duration::from_millis(
                file.retry_delay_ms.unwrap_or(DEFAULT_RETRY_DELAY_MS),
            ),
        }
    }
}

/// Parse a TOML settings file
pub fn load_file(path: &Path) -> Result<FileSettings> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}
