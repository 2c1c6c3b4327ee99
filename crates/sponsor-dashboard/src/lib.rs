//! # sponsor-dashboard: Application Layer
//!
//! Wires the pure `sponsor-core` computations to the outside world.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   dashboard.toml ─┐                                                    │
//! │   SPONSOR_* env ──┴──► DashboardConfig                                 │
//! │                           │                                            │
//! │                           ▼                                            │
//! │   sponsors.json ─────► DataStore ──► SponsorMetrics (core)             │
//! │                           │                 │                          │
//! │                           │                 ▼                          │
//! │                           │          report::SponsorRow ──► stdout     │
//! │                           ▼                                            │
//! │                    state::SponsorsScreen / SponsorDetailScreen         │
//! │                    (dialog flags + SponsorForm / TaskForm)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod report;
pub mod state;
pub mod store;

pub use config::DashboardConfig;
pub use error::{DashboardError, DashboardResult};
pub use report::{SponsorDetail, SponsorReport, SponsorRow};
pub use state::{SponsorDetailScreen, SponsorsScreen};
pub use store::{DataStore, Snapshot};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG` wins when set (e.g. `RUST_LOG=sponsor_core=trace`)
/// - Otherwise `logging.level` from the config
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(config: &config::LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
