//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the site names an application and no module twice
//! - Validate addresses, the base URL and the alias table
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LapurdConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::LapurdConfig;

/// A semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("site.application must not be empty")]
    MissingApplication,

    #[error("module '{0}' is enabled more than once")]
    DuplicateModule(String),

    #[error("{field} '{value}' is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("site.base_url '{0}' is not a valid URL")]
    InvalidBaseUrl(String),

    #[error("alias '{0}' points to itself")]
    SelfAlias(String),

    #[error("site.max_redirects must be at least 1")]
    ZeroRedirects,

    #[error("server.request_timeout_secs must be at least 1")]
    ZeroTimeout,
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &LapurdConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let site = &config.site;

    if site.application.trim().is_empty() {
        errors.push(ValidationError::MissingApplication);
    }

    let mut seen = HashSet::new();
    for module in &site.modules {
        if !seen.insert(module.as_str()) {
            errors.push(ValidationError::DuplicateModule(module.clone()));
        }
    }

    check_address(&mut errors, "server.bind_address", &config.server.bind_address);
    if config.observability.metrics_enabled {
        check_address(&mut errors, "observability.metrics_address", &config.observability.metrics_address);
    }

    if !site.base_url.starts_with('/') && Url::parse(&site.base_url).is_err() {
        errors.push(ValidationError::InvalidBaseUrl(site.base_url.clone()));
    }

    for (alias, path) in &site.aliases {
        if alias == path {
            errors.push(ValidationError::SelfAlias(alias.clone()));
        }
    }

    if site.max_redirects == 0 {
        errors.push(ValidationError::ZeroRedirects);
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}
