//! File-based configuration with per-field defaults.
//!
//! ```toml
//! [database]
//! path = "docdesk.sqlite3"
//!
//! [logging]
//! level = "info"
//! dir = "/var/log/docdesk"
//! ```
//!
//! A missing file yields defaults; a malformed one is an error.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "docdesk.toml";
pub const DEFAULT_DB_FILE: &str = "docdesk.sqlite3";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config `{}`: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Absolute directory for rolling log files; `None` logs to stderr.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub db_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

fn default_db_path() -> PathBuf {
    PathBuf::from(DEFAULT_DB_FILE)
}

fn default_log_level() -> String {
    crate::logging::default_log_level().to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

impl LoggingConfig {
    /// Configured log directory; an empty `dir` counts as unset.
    pub fn log_dir(&self) -> Option<&Path> {
        self.dir
            .as_deref()
            .filter(|dir| !dir.as_os_str().is_empty())
    }
}

impl Config {
    pub fn from_toml_str(contents: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Reads `path`, falling back to defaults when it does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents, path),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(path) = overrides.db_path {
            self.database.path = path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(dir) = overrides.log_dir {
            self.logging.dir = Some(dir);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, ConfigError, ConfigOverrides};
    use std::path::{Path, PathBuf};

    #[test]
    fn missing_sections_use_defaults() {
        let config = Config::from_toml_str("[logging]\nlevel = \"warn\"\n", Path::new("t.toml"))
            .expect("valid toml");
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.dir, None);
        assert_eq!(config.database.path, PathBuf::from("docdesk.sqlite3"));
    }

    #[test]
    fn malformed_file_is_reported() {
        let err = Config::from_toml_str("[database\npath = 1", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn empty_log_dir_means_stderr() {
        let config =
            Config::from_toml_str("[logging]\ndir = \"\"\n", Path::new("t.toml")).unwrap();
        assert_eq!(config.logging.log_dir(), None);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn overrides_win_over_file_values() {
        let config = Config::from_toml_str(
            "[database]\npath = \"file.db\"\n[logging]\nlevel = \"info\"\n",
            Path::new("t.toml"),
        )
        .unwrap()
        .apply(ConfigOverrides {
            db_path: Some(PathBuf::from("cli.db")),
            log_level: Some("debug".to_string()),
            log_dir: None,
        });
        assert_eq!(config.database.path, PathBuf::from("cli.db"));
        assert_eq!(config.logging.level, "debug");
    }
}
