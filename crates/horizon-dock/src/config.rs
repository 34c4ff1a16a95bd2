//! Dock configuration.
//!
//! Configuration is read from TOML. Every key is optional; missing keys
//! take the defaults below.
//!
//! ```toml
//! [reveal]
//! poll_interval_ms = 550
//! pressure_threshold = 250
//! pressure_timeout_ms = 1000
//!
//! [items]
//! animate_removals = true
//! animate_insertions = true
//!
//! [[favorites]]
//! id = "org.gnome.Nautilus.desktop"
//! name = "Files"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::favorites::FavoriteApp;
use crate::host::PressureConfig;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("Invalid value for '{key}': {message}")]
    Invalid { key: &'static str, message: String },
}

/// Edge reveal settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Delay between auto-hide polls while revealed.
    pub poll_interval_ms: u64,
    /// Pressure needed to trigger a reveal.
    pub pressure_threshold: u32,
    /// Window over which pressure accumulates.
    pub pressure_timeout_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 550,
            pressure_threshold: 250,
            pressure_timeout_ms: 1000,
        }
    }
}

impl RevealConfig {
    /// The poll interval as a `Duration`.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Parameters for the host's pressure sensor.
    pub fn pressure(&self) -> PressureConfig {
        PressureConfig {
            threshold: self.pressure_threshold,
            timeout: Duration::from_millis(self.pressure_timeout_ms),
        }
    }
}

/// Item animation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemsConfig {
    /// Animate removed items out when the overview is idle on screen.
    pub animate_removals: bool,
    /// Animate new items in after the first pass.
    pub animate_insertions: bool,
}

impl Default for ItemsConfig {
    fn default() -> Self {
        Self {
            animate_removals: true,
            animate_insertions: true,
        }
    }
}

/// Complete dock configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockConfig {
    /// Edge reveal settings.
    pub reveal: RevealConfig,
    /// Item animation settings.
    pub items: ItemsConfig,
    /// Initial favorites.
    pub favorites: Vec<FavoriteApp>,
}

impl DockConfig {
    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reveal.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "reveal.poll_interval_ms",
                message: "must be greater than zero".into(),
            });
        }
        if self.reveal.pressure_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "reveal.pressure_timeout_ms",
                message: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DockConfig::from_toml_str("").unwrap();
        assert_eq!(config, DockConfig::default());
        assert_eq!(config.reveal.poll_interval(), Duration::from_millis(550));
        assert_eq!(
            config.reveal.pressure(),
            PressureConfig {
                threshold: 250,
                timeout: Duration::from_millis(1000),
            }
        );
    }

    #[test]
    fn test_partial_override() {
        let config = DockConfig::from_toml_str(
            r#"
            [reveal]
            poll_interval_ms = 300

            [items]
            animate_removals = false

            [[favorites]]
            id = "firefox.desktop"
            name = "Firefox"
            "#,
        )
        .unwrap();

        assert_eq!(config.reveal.poll_interval_ms, 300);
        assert_eq!(config.reveal.pressure_threshold, 250);
        assert!(!config.items.animate_removals);
        assert!(config.items.animate_insertions);
        assert_eq!(config.favorites, vec![FavoriteApp::new("firefox.desktop", "Firefox")]);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = DockConfig::from_toml_str("[reveal]\npoll_interval_ms = 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "reveal.poll_interval_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_parse_error() {
        let err = DockConfig::from_toml_str("[reveal\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_round_trip() {
        let mut config = DockConfig::default();
        config.favorites.push(FavoriteApp::new("term.desktop", "Terminal"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config.to_toml_string().unwrap().as_bytes())
            .unwrap();

        assert_eq!(DockConfig::load(file.path()).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = DockConfig::load("/nonexistent/horizon-dock.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
