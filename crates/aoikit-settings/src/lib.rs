//! AOIKit Settings Crate
//!
//! Handles application configuration: geocoding service, map defaults and
//! search marker timing, persisted as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{Config, GeocoderSettings, MapSettings, SearchSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
