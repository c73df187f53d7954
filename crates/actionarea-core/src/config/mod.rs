//! Configuration management for Action Area.
//!
//! This module handles loading, saving, and validating configuration.
//!
//! ## Configuration File Locations
//!
//! | Platform | Path |
//! |----------|------|
//! | Linux | `~/.config/actionarea/config.toml` |
//! | macOS | `~/Library/Application Support/dev.fieldkit.ActionArea/config.toml` |
//! | Windows | `%APPDATA%\fieldkit\ActionArea\config\config.toml` |
//!
//! ## Example
//!
//! ```rust,ignore
//! use actionarea_core::config::Config;
//!
//! let config = Config::load()?;
//! println!("Landscape at {}:1", config.layout.landscape_aspect);
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main configuration struct for Action Area.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Size classification and region metrics
    pub layout: LayoutConfig,
    /// Action bar settings
    pub action_bar: ActionBarConfig,
    /// Animation settings
    pub animation: AnimationConfig,
    /// Terminal UI settings
    pub ui: UiConfig,
}

/// Layout configuration options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width/height ratio (in cells) at or above which a size is landscape
    pub landscape_aspect: f32,
    /// Minimum width (in cells) for landscape
    pub min_landscape_width: u16,
    /// Share of the width given to the master region when expanded
    pub master_fraction: f32,
    /// Minimum master region width when expanded
    pub min_master_width: u16,
    /// Margin of a unit shown alone
    pub margin: u16,
    /// Margin of a unit inside an expanded region
    pub split_margin: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            landscape_aspect: crate::DEFAULT_LANDSCAPE_ASPECT,
            min_landscape_width: crate::DEFAULT_MIN_LANDSCAPE_WIDTH,
            master_fraction: 0.38,
            min_master_width: 28,
            margin: 2,
            split_margin: 1,
        }
    }
}

/// Action bar configuration options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionBarConfig {
    /// Secondary actions rendered per bar
    pub max_items: usize,
    /// Rows taken by a bar
    pub height: u16,
}

impl Default for ActionBarConfig {
    fn default() -> Self {
        Self {
            max_items: crate::DEFAULT_MAX_BAR_ITEMS,
            height: 3,
        }
    }
}

/// Animation configuration options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Animate transitions; when off every step applies immediately
    pub enabled: bool,
    /// Length of one transition
    #[serde(with = "humantime_serde")]
    pub duration: Duration,
    /// Interval between TUI frames
    #[serde(with = "humantime_serde")]
    pub frame_interval: Duration,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration: Duration::from_millis(crate::DEFAULT_ANIMATION_MS),
            frame_interval: Duration::from_millis(50),
        }
    }
}

/// UI configuration options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Theme (dark, light)
    pub theme: String,
    /// Show the log panel on start
    pub show_log: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            show_log: true,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// If the configuration file doesn't exist, returns the default configuration.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load and validate configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::ConfigError(format!("Failed to read config: {e}")))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location.
    ///
    /// Creates the configuration directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::ConfigError(format!("Failed to create config directory: {e}"))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)
            .map_err(|e| Error::ConfigError(format!("Failed to write config: {e}")))
    }

    /// Reject values the controller cannot work with.
    pub fn validate(&self) -> Result<()> {
        let invalid = |key: &str, reason: &str| -> Result<()> {
            Err(Error::InvalidConfig {
                key: key.to_string(),
                reason: reason.to_string(),
            })
        };

        if !(self.layout.landscape_aspect.is_finite() && self.layout.landscape_aspect > 0.0) {
            return invalid("layout.landscape_aspect", "must be a positive number");
        }
        if !(self.layout.master_fraction > 0.0 && self.layout.master_fraction < 1.0) {
            return invalid("layout.master_fraction", "must be between 0 and 1");
        }
        if self.layout.min_master_width >= self.layout.min_landscape_width {
            return invalid(
                "layout.min_master_width",
                "must be smaller than layout.min_landscape_width",
            );
        }
        if self.action_bar.height == 0 {
            return invalid("action_bar.height", "must be at least one row");
        }
        if self.animation.frame_interval.is_zero() {
            return invalid("animation.frame_interval", "must be greater than zero");
        }
        if !matches!(self.ui.theme.as_str(), "dark" | "light") {
            return invalid("ui.theme", "must be 'dark' or 'light'");
        }
        Ok(())
    }

    /// Get the default configuration directory path.
    #[must_use]
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "fieldkit", "actionarea")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the full path to the configuration file.
    #[must_use]
    pub fn config_path() -> PathBuf {
        Self::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }
}

mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = duration.as_millis();
        if millis % 1000 == 0 {
            serializer.serialize_str(&format!("{}s", millis / 1000))
        } else {
            serializer.serialize_str(&format!("{millis}ms"))
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_duration(&s).ok_or_else(|| serde::de::Error::custom("invalid duration format"))
    }
}

/// Parse `"250ms"`, `"2s"` or `"1m"`.
pub fn parse_duration(value: &str) -> Option<Duration> {
    let value = value.trim();
    if let Some(millis) = value.strip_suffix("ms") {
        return millis.parse().ok().map(Duration::from_millis);
    }
    if let Some(secs) = value.strip_suffix('s') {
        return secs.parse().ok().map(Duration::from_secs);
    }
    value
        .strip_suffix('m')
        .and_then(|mins| mins.parse::<u64>().ok())
        .map(|mins| Duration::from_secs(mins * 60))
}
