//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `wefield.toml` in the working directory unless another path is
//! given. Every field has a sensible default so the file is optional.
//! Environment variables take precedence over file values.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the store document lives.
    pub storage: StorageConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Export settings.
    pub export: ExportConfig,
}

/// Document storage configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the store document.
    pub data_dir: PathBuf,
    /// Storage key; the document is `<data_dir>/<key>.json`.
    pub key: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Export configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// File written by `wefield export` when `--out` is not given.
    pub file_name: PathBuf,
}

impl Config {
    /// Default config file name, looked up in the working directory.
    pub const FILE_NAME: &'static str = "wefield.toml";

    /// Load configuration from `path` (or `wefield.toml` if `None`, and only
    /// if present) then apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, if an
    /// explicitly requested file is missing, or if validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path, true)?,
            None => Self::from_file(Path::new(Self::FILE_NAME), false)?,
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path, required: bool) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
                Ok(Self::default())
            }
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("WEFIELD_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("WEFIELD_STORAGE_KEY") {
            self.storage.key = val;
        }
        if let Ok(val) = std::env::var("WEFIELD_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "storage key must not be empty".to_string(),
            ));
        }
        if self.storage.key.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "storage key must not contain path separators".to_string(),
            ));
        }
        self.log_filter()?;
        Ok(())
    }

    /// Parse the logging filter directive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::LogFilter`] when the directive is malformed.
    pub fn log_filter(&self) -> Result<EnvFilter, ConfigError> {
        Ok(EnvFilter::try_new(&self.logging.filter)?)
    }

    /// Full path of the store document.
    #[must_use]
    pub fn document_path(&self) -> PathBuf {
        self.storage.data_dir.join(format!("{}.json", self.storage.key))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            key: "we_field_db".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "wefield=info,wefield_app=info".to_string(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: PathBuf::from("we_field_export.json"),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Malformed logging filter directive.
    #[error("invalid log filter")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
