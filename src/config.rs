//! Layered configuration, highest priority first:
//! 1. CLI flags
//! 2. Environment variables (via clap `env`)
//! 3. TOML file (`<config_dir>/taskpulse/config.toml` or `--config`)
//! 4. Compiled defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::TrackerError;

const APP_DIR: &str = "taskpulse";

/// Config file layout. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    storage: StorageFileConfig,
    log: LogFileConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StorageFileConfig {
    db_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LogFileConfig {
    level: Option<String>,
}

/// Overrides gathered from the command line and environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub db_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            db_path: data_dir.join(APP_DIR).join("taskpulse.db"),
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Resolve configuration from overrides and the config file.
    ///
    /// A missing default config file is treated as empty; a missing file
    /// given explicitly is an error.
    pub fn load(overrides: &Overrides) -> Result<Self, TrackerError> {
        let file = load_config_file(overrides.config_path.as_deref())?;
        Ok(Self::resolve(overrides, &file))
    }

    fn resolve(overrides: &Overrides, file: &ConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            db_path: overrides
                .db_path
                .clone()
                .or_else(|| file.storage.db_path.clone())
                .unwrap_or(defaults.db_path),
            log_level: overrides
                .log_level
                .clone()
                .or_else(|| file.log.level.clone())
                .unwrap_or(defaults.log_level),
        }
    }
}

fn load_config_file(explicit_path: Option<&Path>) -> Result<ConfigFile, TrackerError> {
    let path = match explicit_path {
        Some(p) => {
            let contents = std::fs::read_to_string(p).map_err(|e| {
                TrackerError::config(format!("failed to read config file {}: {e}", p.display()))
            })?;
            return parse(&contents);
        }
        None => match dirs::config_dir() {
            Some(dir) => dir.join(APP_DIR).join("config.toml"),
            None => return Ok(ConfigFile::default()),
        },
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => parse(&contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(TrackerError::config(format!(
            "failed to read config file {}: {e}",
            path.display()
        ))),
    }
}

fn parse(contents: &str) -> Result<ConfigFile, TrackerError> {
    toml::from_str(contents)
        .map_err(|e| TrackerError::config(format!("failed to parse config file: {e}")))
}
