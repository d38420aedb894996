//! Callback invocation for resolved routes.
//!
//! # Responsibilities
//! - Instantiate the route's provider through the cycle's resolver
//! - Check the named callback exists on the instance
//! - Map the argument template onto the concrete path
//! - Capture everything the callback writes
//!
//! # Design Decisions
//! - Output capture is all-or-nothing: a failing callback's partial output
//!   is dropped together with its buffer

use crate::component::{ComponentResolver, Output};
use crate::error::{LapurdError, Result};
use crate::routing::{map_arguments, ResolvedRoute, RouteEntry};

/// Invoke the callback of a resolved route and return its output.
pub fn call(route: &ResolvedRoute, resolver: &mut ComponentResolver<'_>) -> Result<String> {
    call_entry(&route.entry, &route.path, resolver)
}

/// Invoke the callback of `entry` with arguments taken from `path`.
pub fn call_entry(entry: &RouteEntry, path: &str, resolver: &mut ComponentResolver<'_>) -> Result<String> {
    let component = resolver.resolve(&entry.provider)?;

    let name = entry.spec.callback.as_deref().unwrap_or_default();
    let callback = component
        .callback(name)
        .ok_or_else(|| LapurdError::InvalidCallback {
            callback: name.to_string(),
            component: component.descriptor().namespace.clone(),
        })?;

    let arguments = map_arguments(&entry.spec.arguments, path);

    tracing::debug!(
        pattern = %entry.pattern,
        component = %component.descriptor().namespace,
        callback = name,
        arguments = ?arguments,
        "Calling route handler"
    );

    let mut output = Output::new();
    callback(&arguments, &mut output).map_err(|source| LapurdError::CallbackFailed {
        callback: name.to_string(),
        component: component.descriptor().namespace.clone(),
        source,
    })?;

    Ok(output.into_string())
}
