//! # Dashboard Error Types
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Dashboard Error Categories                          │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │    Snapshot     │  │      Domain             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  ConfigParse    │  │  Io             │  │  Core (from core crate) │ │
//! │  │  ConfigSave     │  │  Json           │  │  SponsorNotFound        │ │
//! │  │  InvalidConfig  │  │                 │  │  FormClosed             │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use sponsor_core::CoreError;
use thiserror::Error;

/// Result type alias for dashboard operations.
pub type DashboardResult<T> = Result<T, DashboardError>;

#[derive(Debug, Error)]
pub enum DashboardError {
    // =========================================================================
    // File Errors
    // =========================================================================
    /// A file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data snapshot is not valid JSON of the expected shape.
    #[error("Invalid data snapshot: {0}")]
    Json(#[from] serde_json::Error),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// The config file is not valid TOML of the expected shape.
    #[error("Failed to parse config: {0}")]
    ConfigParse(String),

    /// The config could not be serialized.
    #[error("Failed to save config: {0}")]
    ConfigSave(String),

    /// A config value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // =========================================================================
    // Domain Errors
    // =========================================================================
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Sponsor not found: {0}")]
    SponsorNotFound(u32),

    /// A form action was attempted while its dialog is closed.
    #[error("The {0} form is not open")]
    FormClosed(&'static str),
}

impl DashboardError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DashboardError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<toml::de::Error> for DashboardError {
    fn from(err: toml::de::Error) -> Self {
        DashboardError::ConfigParse(err.to_string())
    }
}

impl From<toml::ser::Error> for DashboardError {
    fn from(err: toml::ser::Error) -> Self {
        DashboardError::ConfigSave(err.to_string())
    }
}
