//! Configuration file support for the popkit demo.
//!
//! Settings are stored as JSON so they can be exported, edited by hand and
//! imported again. Every field has a default, so a partial file is valid.

use std::path::Path;

use popkit_ui::Theme;
use serde::{Deserialize, Serialize};

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
    /// Get the display name for this log level.
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "Error",
            LogLevel::Warn => "Warn",
            LogLevel::Info => "Info",
            LogLevel::Debug => "Debug",
            LogLevel::Trace => "Trace",
        }
    }

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

/// Demo configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Application name (for identification)
    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default)]
    pub preferences: UserPreferences,

    /// Timing and stacking values handed to every widget
    #[serde(default)]
    pub theme: Theme,
}

fn default_app_name() -> String {
    "popkit".to_string()
}

/// User preferences section of the config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Print each story's view outline after its walkthrough
    #[serde(default)]
    pub show_outline: bool,
}

impl AppConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            app_name: default_app_name(),
            preferences: UserPreferences::default(),
            theme: Theme::default(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
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

    /// I/O error when reading config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use popkit_ui::ThemeProvider;

    #[test]
    fn test_default_config_round_trips() {
        let config = AppConfig::default();
        let json = config.to_json().unwrap();
        let parsed = AppConfig::from_json(&json).unwrap();
        assert_eq!(parsed.version, CONFIG_VERSION);
        assert_eq!(parsed.app_name, "popkit");
        assert_eq!(parsed.preferences.log_level, LogLevel::Info);
        assert_eq!(parsed.theme, Theme::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = AppConfig::from_json(
            r#"{ "version": 1, "theme": { "timing": { "submenu_close_delay_ms": 120 } } }"#,
        )
        .unwrap();
        assert_eq!(config.app_name, "popkit");
        assert!(!config.preferences.show_outline);
        assert_eq!(
            config.theme.submenu_close_delay(),
            Duration::from_millis(120)
        );
    }

    #[test]
    fn test_log_level_parses_lowercase() {
        let config =
            AppConfig::from_json(r#"{ "version": 1, "preferences": { "log_level": "trace" } }"#)
                .unwrap();
        assert_eq!(config.preferences.log_level, LogLevel::Trace);
        assert_eq!(
            config.preferences.log_level.to_level_filter(),
            log::LevelFilter::Trace
        );
        assert_eq!(config.preferences.log_level.name(), "Trace");
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let err = AppConfig::from_json(r#"{ "version": 99 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::VersionTooNew {
                file_version: 99,
                supported_version: CONFIG_VERSION
            }
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = AppConfig::from_json("{ version: ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AppConfig::load(Path::new("/nonexistent/popkit-config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
