//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Initialize logging and, when enabled, the metrics endpoint
//! - Assemble the site from the built-in catalog
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use crate::builtin;
use crate::config::{load_config, ConfigError, LapurdConfig, ObservabilityConfig};
use crate::error::LapurdError;
use crate::observability::{logging, metrics};
use crate::site::Site;

/// Why a process could not start.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to load configuration from {path}: {source}")]
    Config { path: String, source: ConfigError },

    #[error("failed to build site: {0}")]
    Site(#[from] LapurdError),
}

/// Read the configuration file.
pub fn load(path: &Path) -> Result<LapurdConfig, StartupError> {
    load_config(path).map_err(|source| StartupError::Config {
        path: path.display().to_string(),
        source,
    })
}

/// Install logging and, when enabled, the metrics exporter.
///
/// The exporter needs a running Tokio runtime.
pub fn init_observability(config: &ObservabilityConfig) {
    logging::init(&config.log_level);

    if config.metrics_enabled {
        match config.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }
}

/// Assemble the site described by `config` from the built-in components.
pub fn build_site(config: &LapurdConfig) -> Result<Arc<Site>, StartupError> {
    let site = Site::build(&config.site, Arc::new(builtin::catalog()))?;
    Ok(Arc::new(site))
}
