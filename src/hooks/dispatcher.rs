//! Hook dispatch in fixed provider order.
//!
//! # Responsibilities
//! - Enumerate the providers implementing a hook: core, enabled modules in
//!   enable order, then the application
//! - Invoke a hook on one provider or on all of them
//! - Accumulate results, or hand each result to a caller-supplied callback
//!
//! # Design Decisions
//! - Hooker lists are cached per hook name for the dispatcher's lifetime
//! - A provider that does not implement a hook is skipped, never an error
//! - Errors from hook implementations propagate unchanged in meaning

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::component::{Catalog, Descriptor, Providers};
use crate::error::{LapurdError, Result};
use crate::hooks::{HookFn, HookResults};

/// A provider implementing a hook.
#[derive(Clone)]
pub struct Hooker {
    pub hook: String,
    pub callback: HookFn,
    pub provider: Arc<Descriptor>,
}

impl std::fmt::Debug for Hooker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooker")
            .field("hook", &self.hook)
            .field("provider", &self.provider.namespace)
            .finish()
    }
}

/// Dispatches hooks over the providers of a site.
pub struct HookDispatcher<'a> {
    catalog: &'a Catalog,
    providers: &'a Providers,
    hookers: HashMap<String, Vec<Hooker>>,
}

impl<'a> HookDispatcher<'a> {
    pub fn new(catalog: &'a Catalog, providers: &'a Providers) -> Self {
        Self {
            catalog,
            providers,
            hookers: HashMap::new(),
        }
    }

    /// The implementation of `hook` in `provider`, if any.
    pub fn implementation(&self, hook: &str, provider: &Descriptor) -> Option<HookFn> {
        self.catalog.hook(&provider.namespace, hook).cloned()
    }

    /// All providers implementing `hook`, in precedence order.
    ///
    /// `refresh` drops every cached list before enumerating.
    pub fn hookers(&mut self, hook: &str, refresh: bool) -> Vec<Hooker> {
        if refresh {
            self.hookers.clear();
        }

        if let Some(hookers) = self.hookers.get(hook) {
            return hookers.clone();
        }

        let hookers: Vec<Hooker> = self
            .providers
            .hook_order()
            .filter_map(|provider| {
                self.catalog.hook(&provider.namespace, hook).map(|callback| Hooker {
                    hook: hook.to_string(),
                    callback: callback.clone(),
                    provider: provider.clone(),
                })
            })
            .collect();

        tracing::trace!(hook, implementers = hookers.len(), "Hookers enumerated");
        self.hookers.insert(hook.to_string(), hookers.clone());
        hookers
    }

    /// Invoke `hook` on a single provider.
    ///
    /// Returns `None` when the provider does not implement the hook.
    pub fn invoke(&self, hook: &str, provider: &Descriptor, args: &[Value]) -> Result<Option<Value>> {
        self.invoke_with(hook, provider, args, |result, _| Ok(result))
    }

    /// Invoke `hook` on a single provider and post-process the result.
    pub fn invoke_with<T, F>(&self, hook: &str, provider: &Descriptor, args: &[Value], combiner: F) -> Result<Option<T>>
    where
        F: FnOnce(Value, &Descriptor) -> Result<T>,
    {
        match self.implementation(hook, provider) {
            Some(callback) => {
                let result = call(hook, &callback, provider, args)?;
                combiner(result, provider).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Invoke `hook` on every implementer and merge the results.
    pub fn invoke_all(&mut self, hook: &str, args: &[Value]) -> Result<HookResults> {
        let mut results = HookResults::new();
        for hooker in self.hookers(hook, false) {
            results.accumulate(call(hook, &hooker.callback, &hooker.provider, args)?);
        }
        Ok(results)
    }

    /// Invoke `hook` on every implementer, handing each result to `f`
    /// together with its provider instead of accumulating.
    pub fn invoke_all_with<F>(&mut self, hook: &str, args: &[Value], mut f: F) -> Result<()>
    where
        F: FnMut(Value, &Arc<Descriptor>) -> Result<()>,
    {
        for hooker in self.hookers(hook, false) {
            let result = call(hook, &hooker.callback, &hooker.provider, args)?;
            f(result, &hooker.provider)?;
        }
        Ok(())
    }

    pub fn providers(&self) -> &Providers {
        self.providers
    }
}

fn call(hook: &str, callback: &HookFn, provider: &Descriptor, args: &[Value]) -> Result<Value> {
    tracing::trace!(hook, provider = %provider.namespace, "Invoking hook");
    callback(args).map_err(|source| LapurdError::HookFailed {
        hook: hook.to_string(),
        provider: provider.namespace.clone(),
        source,
    })
}
