//! The path registry.
//!
//! # Responsibilities
//! - Store route entries per pattern, one per providing component
//! - Record the mask of every registered pattern
//! - Turn a concrete path into its candidate ancestor patterns
//! - Resolve a path to the winning entry, following redirects
//! - Rewrite aliased paths
//!
//! # Design Decisions
//! - Masks are collected once at registration; a lookup synthesizes one
//!   candidate per known mask instead of scanning the table
//! - Entries for a pattern keep their registration order, which breaks
//!   ties between unweighted modules
//! - Redirect chains are bounded: a revisited pattern or a chain longer
//!   than the configured limit is a `RedirectCycle`

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::component::Descriptor;
use crate::error::{LapurdError, Result};
use crate::hooks::HookDispatcher;
use crate::observability::metrics;
use crate::routing::mask::{segments, PathMask};
use crate::routing::priority::select_entry;
use crate::routing::{map_arguments, Argument};

/// Default bound on the length of a redirect chain.
pub const DEFAULT_MAX_REDIRECTS: usize = 8;

/// What a component declares for one pattern in its `paths` hook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RouteSpec {
    /// Name of the callback on the provider's instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback: Option<String>,

    /// Priority among modules registering the same pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,

    /// Argument template for the callback.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<Argument>,

    /// Path to resolve instead of this entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
}

/// A registered route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteEntry {
    pub pattern: String,
    pub provider: Arc<Descriptor>,
    #[serde(flatten)]
    pub spec: RouteSpec,
}

/// The outcome of a successful resolution.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedRoute {
    /// The path as requested.
    pub requested: String,
    /// The concrete path the entry matched, after redirects.
    pub path: String,
    /// Paths visited before `path` because of redirects.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub redirects: Vec<String>,
    pub entry: RouteEntry,
}

impl ResolvedRoute {
    /// Callback arguments mapped onto the concrete path.
    pub fn arguments(&self) -> Vec<String> {
        map_arguments(&self.entry.spec.arguments, &self.path)
    }
}

/// Registry of every path the site responds to.
#[derive(Debug, Clone)]
pub struct PathRegistry {
    paths: HashMap<String, IndexMap<String, RouteEntry>>,
    masks: BTreeSet<PathMask>,
    aliases: HashMap<String, String>,
    max_redirects: usize,
}

impl Default for PathRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PathRegistry {
    pub fn new() -> Self {
        Self::with_max_redirects(DEFAULT_MAX_REDIRECTS)
    }

    pub fn with_max_redirects(max_redirects: usize) -> Self {
        Self {
            paths: HashMap::new(),
            masks: BTreeSet::new(),
            aliases: HashMap::new(),
            max_redirects,
        }
    }

    /// Populate the registry from every provider's `paths` hook.
    pub fn build(&mut self, dispatcher: &mut HookDispatcher<'_>) -> Result<()> {
        dispatcher.invoke_all_with("paths", &[], |result, provider| {
            let paths = match result {
                Value::Object(paths) => paths,
                Value::Null => return Ok(()),
                other => {
                    return Err(LapurdError::InvalidHookResult {
                        hook: "paths".to_string(),
                        provider: provider.namespace.clone(),
                        reason: format!("expected a mapping of patterns, got {}", other),
                    })
                }
            };

            for (pattern, value) in paths {
                let spec: RouteSpec =
                    serde_json::from_value(value).map_err(|e| LapurdError::InvalidHookResult {
                        hook: "paths".to_string(),
                        provider: provider.namespace.clone(),
                        reason: format!("pattern '{}': {}", pattern, e),
                    })?;
                self.add_path(&pattern, spec, provider.clone());
            }
            Ok(())
        })?;

        tracing::info!(
            patterns = self.paths.len(),
            masks = self.masks.len(),
            "Path registry built"
        );
        Ok(())
    }

    /// Register `spec` under `pattern` on behalf of `provider`.
    ///
    /// A second registration by the same provider replaces the first one
    /// and keeps its position.
    pub fn add_path(&mut self, pattern: &str, spec: RouteSpec, provider: Arc<Descriptor>) {
        self.masks.insert(PathMask::of(pattern));

        let entry = RouteEntry {
            pattern: pattern.to_string(),
            provider: provider.clone(),
            spec,
        };

        tracing::trace!(pattern, provider = %provider.namespace, "Path registered");
        self.paths
            .entry(pattern.to_string())
            .or_default()
            .insert(provider.namespace.clone(), entry);
    }

    pub fn add_alias(&mut self, alias: impl Into<String>, path: impl Into<String>) {
        self.aliases.insert(alias.into(), path.into());
    }

    /// The path an alias stands for, or the path itself.
    pub fn resolve_alias(&self, path: &str) -> String {
        self.aliases.get(path).cloned().unwrap_or_else(|| path.to_string())
    }

    /// Candidate patterns for a concrete path, most specific first.
    pub fn ancestors(&self, path: &str) -> Vec<String> {
        let parts = segments(path);
        self.masks
            .iter()
            .rev()
            .filter(|mask| mask.parts() == parts.len())
            .map(|mask| mask.apply(&parts))
            .collect()
    }

    /// Winning entry for `path` without following redirects.
    pub fn lookup(&self, path: &str) -> Result<Option<&RouteEntry>> {
        for pattern in self.ancestors(path) {
            if let Some(candidates) = self.paths.get(&pattern) {
                if let Some(entry) = select_entry(candidates.values())? {
                    return Ok(Some(entry));
                }
            }
        }
        Ok(None)
    }

    /// Resolve `path` to the entry that handles it.
    pub fn resolve(&self, path: &str) -> Result<ResolvedRoute> {
        let mut current = path.to_string();
        let mut redirects: Vec<String> = Vec::new();
        let mut patterns: Vec<String> = Vec::new();

        loop {
            let entry = match self.lookup(&current)? {
                Some(entry) => entry,
                None => {
                    metrics::record_lookup("not_found");
                    tracing::debug!(path = %current, "No route matched");
                    return Err(LapurdError::RouteNotFound { path: current });
                }
            };

            let Some(target) = entry.spec.redirect.as_deref() else {
                metrics::record_lookup("hit");
                tracing::debug!(
                    path = %current,
                    pattern = %entry.pattern,
                    provider = %entry.provider.namespace,
                    "Route resolved"
                );
                return Ok(ResolvedRoute {
                    requested: path.to_string(),
                    path: current,
                    redirects,
                    entry: entry.clone(),
                });
            };

            if patterns.contains(&entry.pattern) || redirects.len() >= self.max_redirects {
                metrics::record_lookup("redirect_cycle");
                let mut chain = redirects;
                chain.push(current);
                tracing::error!(chain = ?chain, "Redirect cycle detected");
                return Err(LapurdError::RedirectCycle { chain });
            }

            patterns.push(entry.pattern.clone());
            redirects.push(current);

            tracing::debug!(from = %entry.pattern, to = target, "Following redirect");
            current = target.to_string();
        }
    }

    /// Entries registered for exactly `pattern`, in registration order.
    pub fn entries(&self, pattern: &str) -> impl Iterator<Item = &RouteEntry> {
        self.paths.get(pattern).into_iter().flat_map(|e| e.values())
    }

    /// Entry that wins among those registered for exactly `pattern`.
    pub fn winner(&self, pattern: &str) -> Result<Option<&RouteEntry>> {
        select_entry(self.entries(pattern))
    }

    /// Every registered pattern, sorted.
    pub fn patterns(&self) -> Vec<&str> {
        let mut patterns: Vec<&str> = self.paths.keys().map(String::as_str).collect();
        patterns.sort_unstable();
        patterns
    }

    /// Number of registered patterns.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
