//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a site.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::routing::registry::DEFAULT_MAX_REDIRECTS;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct LapurdConfig {
    /// HTTP server settings.
    pub server: ServerConfig,

    /// Components the site is assembled from.
    pub site: SiteConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Deadline for handling one request, hooks and callbacks included.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Site configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    /// Name of the application. Required.
    pub application: String,

    /// Active theme; the application's metadata may override it.
    pub theme: Option<String>,

    /// Enabled modules, in enable order.
    pub modules: Vec<String>,

    /// Base URL handed to templates.
    pub base_url: String,

    /// Web root of the installation.
    pub system_root: PathBuf,

    /// Directory holding the framework's own files.
    pub lapurd_root: PathBuf,

    /// Exact path rewrites applied before resolution.
    pub aliases: BTreeMap<String, String>,

    /// Longest redirect chain followed before giving up.
    pub max_redirects: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            application: String::new(),
            theme: None,
            modules: Vec::new(),
            base_url: "/".to_string(),
            system_root: PathBuf::from("."),
            lapurd_root: PathBuf::from("."),
            aliases: BTreeMap::new(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default log filter; `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Enable the Prometheus endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
