//! Configuration and settings management for AOIKit
//!
//! Configuration is organized into logical sections:
//! - Geocoder (service endpoint, request identity, retry budget)
//! - Map (initial view, fly-to animation, tile source)
//! - Search (how long the search marker stays on screen)
//!
//! Files are JSON or TOML, chosen by extension. Missing sections and keys
//! fall back to their defaults.

use aoikit_core::LatLng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Place search service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderSettings {
    /// Search endpoint URL
    pub endpoint: String,
    /// User-Agent sent with every request; the public service requires one
    pub user_agent: String,
    /// Preferred language for result names
    pub accept_language: String,
    /// Number of candidates requested
    pub result_limit: u32,
    /// Total attempts per lookup, including the first
    pub max_attempts: u32,
    /// Delay before the first retry; doubles for each further retry
    pub base_delay_ms: u64,
    /// Per-request timeout
    pub request_timeout_ms: u64,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://nominatim.openstreetmap.org/search".to_string(),
            user_agent: format!("aoikit/{}", env!("CARGO_PKG_VERSION")),
            accept_language: "en".to_string(),
            result_limit: 1,
            max_attempts: 3,
            base_delay_ms: 250,
            request_timeout_ms: 10_000,
        }
    }
}

impl GeocoderSettings {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Map view settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// Center used while there is no search marker
    pub default_center: LatLng,
    /// Zoom used with the default center
    pub default_zoom: u8,
    /// Zoom the map animates to after a successful search
    pub fly_to_zoom: u8,
    /// Duration of the fly-to animation
    pub fly_duration_ms: u64,
    /// Tile URL template
    pub tile_url: String,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            default_center: LatLng::new(50.96, 6.95),
            default_zoom: 11,
            fly_to_zoom: 13,
            fly_duration_ms: 1000,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
        }
    }
}

impl MapSettings {
    pub fn fly_duration(&self) -> Duration {
        Duration::from_millis(self.fly_duration_ms)
    }
}

/// Search behaviour settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// How long a search marker stays before it is removed
    pub marker_display_ms: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            marker_display_ms: 5000,
        }
    }
}

impl SearchSettings {
    pub fn marker_display(&self) -> Duration {
        Duration::from_millis(self.marker_display_ms)
    }
}

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub geocoder: GeocoderSettings,
    pub map: MapSettings,
    pub search: SearchSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

impl Config {
    /// Create default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform default location, `<config_dir>/aoikit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("aoikit").join("config.toml"))
            .ok_or_else(|| {
                ConfigError::NoConfigDir(std::env::consts::OS.to_string()).into()
            })
    }

    /// Load configuration from file
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        config.validate()?;

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration, using defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!(
                "No configuration at {}, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, content).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn out_of_range(key: &str, value: impl ToString) -> ConfigError {
            ConfigError::OutOfRange {
                key: key.to_string(),
                value: value.to_string(),
            }
        }

        if self.geocoder.endpoint.trim().is_empty() {
            return Err(ConfigError::Missing("geocoder.endpoint".to_string()));
        }
        if self.geocoder.max_attempts == 0 {
            return Err(out_of_range("geocoder.max_attempts", 0));
        }
        if self.geocoder.result_limit == 0 {
            return Err(out_of_range("geocoder.result_limit", 0));
        }
        if self.geocoder.request_timeout_ms == 0 {
            return Err(out_of_range("geocoder.request_timeout_ms", 0));
        }

        if !self.map.default_center.is_valid() {
            return Err(out_of_range("map.default_center", self.map.default_center));
        }
        if self.map.default_zoom == 0 || self.map.default_zoom > 22 {
            return Err(out_of_range("map.default_zoom", self.map.default_zoom));
        }
        if self.map.fly_to_zoom == 0 || self.map.fly_to_zoom > 22 {
            return Err(out_of_range("map.fly_to_zoom", self.map.fly_to_zoom));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.geocoder.max_attempts, 3);
        assert_eq!(config.map.fly_to_zoom, 13);
        assert_eq!(config.map.default_center, LatLng::new(50.96, 6.95));
    }

    #[test]
    fn test_validation_rejects_zero_attempts() {
        let mut config = Config::default();
        config.geocoder.max_attempts = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validation_rejects_bad_center() {
        let mut config = Config::default();
        config.map.default_center = LatLng::new(120.0, 0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [search]
            marker_display_ms = 1500
            "#,
        )
        .expect("parse");
        assert_eq!(config.search.marker_display(), Duration::from_millis(1500));
        assert_eq!(config.geocoder, GeocoderSettings::default());
    }

    #[test]
    fn test_round_trip_toml_and_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = Config::default();
        config.geocoder.accept_language = "de".to_string();

        for name in ["config.toml", "config.json"] {
            let path = dir.path().join("nested").join(name);
            config.save_to_file(&path).expect("save");
            let loaded = Config::load_from_file(&path).expect("load");
            assert_eq!(loaded, config);
        }
    }

    #[test]
    fn test_unsupported_extension() {
        let err = Config::default()
            .save_to_file(Path::new("config.yaml"))
            .unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::load_or_default(&dir.path().join("absent.toml")).expect("load");
        assert_eq!(config, Config::default());
    }
}
