//! Configuration file support for medmark.
//!
//! Viewer tuning (viewport size, hit radius, zoom limits, default marker
//! color, log level) can be exported to and imported from JSON. Every field
//! is optional in the file and falls back to the built-in default.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::constants::{self, zoom as zoom_const};
use crate::geometry::Size;
use crate::view::ScaleLimits;

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Viewer configuration that can be exported and imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Logical viewport size `[width, height]`
    pub viewport: [f64; 2],

    /// Marker hit radius in unscaled screen pixels
    pub hit_radius: f64,

    /// Base marker glyph size
    pub marker_size: f64,

    /// Glyph size multiplier for the hovered marker
    pub highlight_factor: f64,

    /// Smallest allowed zoom
    pub min_scale: f64,

    /// Largest allowed zoom
    pub max_scale: f64,

    /// Multiplicative zoom in/out step
    pub zoom_factor: f64,

    /// Color of newly placed markers
    pub default_marker_color: Rgb,

    /// Log verbosity level
    pub log_level: LogLevel,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            viewport: [constants::VIEWPORT_WIDTH, constants::VIEWPORT_HEIGHT],
            hit_radius: constants::HIT_RADIUS,
            marker_size: constants::MARKER_SIZE,
            highlight_factor: constants::HIGHLIGHT_FACTOR,
            min_scale: zoom_const::MIN,
            max_scale: zoom_const::MAX,
            zoom_factor: zoom_const::FACTOR,
            default_marker_color: Rgb::RED,
            log_level: LogLevel::default(),
        }
    }
}

impl ViewerConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport_size(&self) -> Size {
        Size::new(self.viewport[0], self.viewport[1])
    }

    pub fn scale_limits(&self) -> ScaleLimits {
        ScaleLimits::new(self.min_scale, self.max_scale)
    }

    /// Reject values the transform math cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.viewport_size().is_valid() {
            return Err(ConfigError::Invalid(format!(
                "viewport must be positive, got {:?}",
                self.viewport
            )));
        }
        if !(self.min_scale.is_finite() && self.min_scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "min_scale must be positive, got {}",
                self.min_scale
            )));
        }
        if !(self.max_scale.is_finite() && self.max_scale >= self.min_scale) {
            return Err(ConfigError::Invalid(format!(
                "max_scale must be at least min_scale, got {}",
                self.max_scale
            )));
        }
        if !(self.zoom_factor.is_finite() && self.zoom_factor > 1.0) {
            return Err(ConfigError::Invalid(format!(
                "zoom_factor must be greater than 1, got {}",
                self.zoom_factor
            )));
        }
        if !(self.hit_radius.is_finite() && self.hit_radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "hit_radius must be positive, got {}",
                self.hit_radius
            )));
        }
        Ok(())
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        config.validate()?;
        Ok(config)
    }

    /// Get the default filename for config export.
    pub fn default_filename() -> &'static str {
        "medmark-config.json"
    }

    /// Get the default config file path for auto-load/save.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("medmark").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("medmark")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from an explicit file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Try to load configuration from the default path.
    /// Returns None if the file doesn't exist or can't be read.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return None;
        }

        match Self::load_from(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Failed to load config file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to the default path.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_default_path(&self) -> Result<(), ConfigError> {
        let path = Self::default_path().ok_or_else(|| {
            ConfigError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine config directory",
            ))
        })?;

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = self.to_json()?;
        std::fs::write(&path, json)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading/writing config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Value out of the usable range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::new();
        assert_eq!(config.viewport_size(), Size::new(1200.0, 1200.0));
        assert_eq!(config.hit_radius, 20.0);
        assert_eq!(config.default_marker_color, Rgb::RED);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = ViewerConfig::new();
        config.hit_radius = 30.0;
        config.log_level = LogLevel::Debug;
        config.default_marker_color = Rgb::new(0, 200, 100);

        let loaded = ViewerConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = ViewerConfig::from_json(r#"{"hit_radius": 12.0, "log_level": "warn"}"#)
            .unwrap();
        assert_eq!(config.hit_radius, 12.0);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.viewport, [1200.0, 1200.0]);
    }

    #[test]
    fn test_version_too_new() {
        let err = ViewerConfig::from_json(r#"{"version": 99}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::VersionTooNew {
                file_version: 99,
                supported_version: CONFIG_VERSION
            }
        ));
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        for json in [
            r#"{"min_scale": 0.0}"#,
            r#"{"min_scale": 2.0, "max_scale": 1.0}"#,
            r#"{"viewport": [0.0, 100.0]}"#,
            r#"{"zoom_factor": 1.0}"#,
            r#"{"hit_radius": -1.0}"#,
        ] {
            assert!(
                matches!(ViewerConfig::from_json(json), Err(ConfigError::Invalid(_))),
                "{}",
                json
            );
        }
    }

    #[test]
    fn test_level_filter() {
        assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
        assert_eq!(LogLevel::Error.to_level_filter(), log::LevelFilter::Error);
    }
}
