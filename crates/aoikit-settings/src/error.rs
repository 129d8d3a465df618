//! Error types for the settings crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from reading or writing a configuration file.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The file exists but could not be read.
    #[error("Cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    /// The file or its directory could not be written.
    #[error("Cannot write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML configuration: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Cannot encode configuration as TOML: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// The file parsed but holds unusable values.
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// A configuration that parsed but cannot be used.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Only `.toml` and `.json` files are understood.
    #[error("Unsupported config format: '{0}'")]
    UnsupportedFormat(String),

    #[error("Value out of range for '{key}': {value}")]
    OutOfRange { key: String, value: String },

    #[error("Missing value for '{0}'")]
    Missing(String),

    /// The platform has no per-user configuration directory.
    #[error("No configuration directory on {0}")]
    NoConfigDir(String),
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
