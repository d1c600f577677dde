//! # Configuration
//!
//! Configuration is managed by [`confique`], which layers environment variables
//! over an optional TOML file over compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Command-line flags**: applied by the binary after loading.
//! 2. **Environment variables**: `TASKLIST_BACKEND`, `TASKLIST_DATA_DIR`, etc.
//! 3. **Config file**: `--config <path>`, else `tasklist.toml` in the OS config
//!    directory (via `directories`). A missing file is not an error.
//! 4. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Env | Default | Description |
//! |-----|-----|---------|-------------|
//! | `backend` | `TASKLIST_BACKEND` | `file` | `file` or `memory` |
//! | `data_dir` | `TASKLIST_DATA_DIR` | OS data dir | Where `datastore.json` lives |
//! | `kind` | `TASKLIST_KIND` | `Person` | Entity kind records are stored under |
//! | `bind` | `TASKLIST_BIND` | `127.0.0.1:8080` | HTTP listen address |
//! | `log_format` | `TASKLIST_LOG_FORMAT` | `pretty` | `pretty` or `json` |

use crate::logging::LogFormat;
use crate::model::DEFAULT_KIND;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub const CONFIG_FILE: &str = "tasklist.toml";
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] confique::Error),

    #[error("invalid value for `{key}`: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Which datastore implementation backs the record store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    File,
    Memory,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(BackendKind::File),
            "memory" | "mem" => Ok(BackendKind::Memory),
            other => Err(format!("unknown backend: {}", other)),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::File => write!(f, "file"),
            BackendKind::Memory => write!(f, "memory"),
        }
    }
}

/// Configuration for tasklist, stored in `tasklist.toml`.
///
/// Enum-valued settings are kept as strings here and parsed by the accessors,
/// so env and file sources share one code path.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TaskListConfig {
    /// "file" or "memory"
    #[config(env = "TASKLIST_BACKEND", default = "file")]
    pub backend: String,

    /// When absent, the OS data directory for tasklist is used.
    #[config(env = "TASKLIST_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[config(env = "TASKLIST_KIND", default = "Person")]
    pub kind: String,

    #[config(env = "TASKLIST_BIND", default = "127.0.0.1:8080")]
    pub bind: String,

    /// "pretty" or "json"
    #[config(env = "TASKLIST_LOG_FORMAT", default = "pretty")]
    pub log_format: String,
}

impl Default for TaskListConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::File.to_string(),
            data_dir: None,
            kind: DEFAULT_KIND.to_string(),
            bind: DEFAULT_BIND.to_string(),
            log_format: LogFormat::Pretty.to_string(),
        }
    }
}

impl TaskListConfig {
    /// Load env, then `file` (or the default config file), then defaults.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match file {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_file(),
        };

        let mut builder = Self::builder().env();
        if let Some(path) = path {
            builder = builder.file(path);
        }
        let config = builder.load()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.backend()?;
        self.log_format()?;
        if self.kind.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "kind",
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn backend(&self) -> Result<BackendKind, ConfigError> {
        self.backend
            .parse()
            .map_err(|message| ConfigError::InvalidValue {
                key: "backend",
                message,
            })
    }

    pub fn log_format(&self) -> Result<LogFormat, ConfigError> {
        self.log_format
            .parse()
            .map_err(|message| ConfigError::InvalidValue {
                key: "log_format",
                message,
            })
    }

    /// Get the data directory, using the OS default if not configured.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from(".tasklist"))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "tasklist")
}

fn default_config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = TaskListConfig::default();
        assert_eq!(config.backend().unwrap(), BackendKind::File);
        assert_eq!(config.log_format().unwrap(), LogFormat::Pretty);
        assert_eq!(config.kind, "Person");
        assert_eq!(config.bind, "127.0.0.1:8080");
    }

    #[test]
    fn test_explicit_data_dir_wins() {
        let config = TaskListConfig {
            data_dir: Some(PathBuf::from("/tmp/tasks")),
            ..Default::default()
        };
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/tasks"));
    }

    #[test]
    fn test_invalid_backend_is_reported() {
        let config = TaskListConfig {
            backend: "cloud".to_string(),
            ..Default::default()
        };
        let err = config.backend().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value for `backend`: unknown backend: cloud"
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "backend = \"memory\"\nkind = \"Task\"\nlog_format = \"json\"\n",
        )
        .unwrap();

        let config = TaskListConfig::load(Some(&path)).unwrap();
        assert_eq!(config.backend().unwrap(), BackendKind::Memory);
        assert_eq!(config.kind, "Task");
        assert_eq!(config.log_format().unwrap(), LogFormat::Json);
        assert_eq!(config.bind, DEFAULT_BIND);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let config = TaskListConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.kind, "Person");
    }

    #[test]
    fn test_load_rejects_bad_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "log_format = \"xml\"\n").unwrap();
        assert!(matches!(
            TaskListConfig::load(Some(&path)),
            Err(ConfigError::InvalidValue { key: "log_format", .. })
        ));
    }
}
