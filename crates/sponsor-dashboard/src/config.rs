//! # Dashboard Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SPONSOR_DATA_PATH=./data/sponsors.json                             │
//! │     SPONSOR_LOG_LEVEL=debug                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config PATH, or the platform config dir:                         │
//! │     ~/.config/sponsor-dashboard/dashboard.toml (Linux)                 │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [data]
//! snapshot_path = "data/sponsors.json"
//!
//! [display]
//! currency_code = "USD"
//! currency_symbol = "$"
//! margin_decimals = 2
//! placeholder = "—"
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::{DashboardError, DashboardResult};

/// Highest number of decimals shown for a profit margin.
pub const MAX_MARGIN_DECIMALS: u8 = 4;

// =============================================================================
// Data Settings
// =============================================================================

/// Where the read-only data snapshot lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("data/sponsors.json")
}

impl Default for DataSettings {
    fn default() -> Self {
        DataSettings {
            snapshot_path: default_snapshot_path(),
        }
    }
}

// =============================================================================
// Display Settings
// =============================================================================

/// How amounts and ratios are rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// ISO 4217 code, informational only.
    #[serde(default = "default_currency_code")]
    pub currency_code: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Decimals in the profit margin column (0-4).
    #[serde(default = "default_margin_decimals")]
    pub margin_decimals: u8,

    /// Shown in place of a ratio that is undefined.
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
}

fn default_currency_code() -> String {
    "USD".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_margin_decimals() -> u8 {
    2
}

fn default_placeholder() -> String {
    "—".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_code: default_currency_code(),
            currency_symbol: default_currency_symbol(),
            margin_decimals: default_margin_decimals(),
            placeholder: default_placeholder(),
        }
    }
}

// =============================================================================
// Logging Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: default_log_level(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete dashboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub data: DataSettings,

    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl DashboardConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform config dir)
    /// 3. `SPONSOR_*` environment variables
    pub fn load(config_path: Option<PathBuf>) -> DashboardResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Same as [`load`](Self::load) with a custom variable lookup.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> DashboardResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading dashboard config from file");
                config = Self::read_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load dashboard config: {}. Using defaults.", e);
            Self::default()
        })
    }

    fn read_file(path: &Path) -> DashboardResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| DashboardError::io(path, e))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> DashboardResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| DashboardError::ConfigSave("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DashboardError::io(parent, e))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| DashboardError::io(&path, e))?;

        info!(?path, "Dashboard config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> DashboardResult<()> {
        if self.data.snapshot_path.as_os_str().is_empty() {
            return Err(DashboardError::InvalidConfig(
                "data.snapshot_path must not be empty".into(),
            ));
        }

        let code = &self.display.currency_code;
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(DashboardError::InvalidConfig(format!(
                "display.currency_code must be three uppercase letters, got: '{}'",
                code
            )));
        }

        if self.display.currency_symbol.is_empty() {
            return Err(DashboardError::InvalidConfig(
                "display.currency_symbol must not be empty".into(),
            ));
        }

        if self.display.margin_decimals > MAX_MARGIN_DECIMALS {
            return Err(DashboardError::InvalidConfig(format!(
                "display.margin_decimals must be at most {}, got: {}",
                MAX_MARGIN_DECIMALS, self.display.margin_decimals
            )));
        }

        if EnvFilter::try_new(&self.logging.level).is_err() {
            return Err(DashboardError::InvalidConfig(format!(
                "logging.level is not a valid filter: '{}'",
                self.logging.level
            )));
        }

        Ok(())
    }

    /// Applies `SPONSOR_*` overrides from `lookup`.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("SPONSOR_DATA_PATH") {
            debug!(path = %path, "Overriding snapshot path from environment");
            self.data.snapshot_path = PathBuf::from(path);
        }

        if let Some(code) = lookup("SPONSOR_CURRENCY_CODE") {
            self.display.currency_code = code.to_uppercase();
        }

        if let Some(symbol) = lookup("SPONSOR_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }

        if let Some(decimals) = lookup("SPONSOR_MARGIN_DECIMALS") {
            match decimals.parse::<u8>() {
                Ok(d) => self.display.margin_decimals = d,
                Err(_) => warn!(value = %decimals, "Ignoring non-numeric SPONSOR_MARGIN_DECIMALS"),
            }
        }

        if let Some(placeholder) = lookup("SPONSOR_PLACEHOLDER") {
            self.display.placeholder = placeholder;
        }

        if let Some(level) = lookup("SPONSOR_LOG_LEVEL") {
            debug!(level = %level, "Overriding log level from environment");
            self.logging.level = level;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "sponsorship", "sponsor-dashboard")
            .map(|dirs| dirs.config_dir().join("dashboard.toml"))
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.data.snapshot_path
    }
}
