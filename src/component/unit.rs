//! Compiled code units.
//!
//! A unit is everything a component contributes: an optional metadata
//! function, the hooks it implements and a constructor for its instance.
//! Which hooks a component implements is fixed when the unit is built.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::component::{Component, Descriptor};
use crate::error::BoxError;
use crate::hooks::HookFn;

type InfoFn = Arc<dyn Fn() -> Map<String, Value> + Send + Sync>;
type Constructor = Arc<dyn Fn(Descriptor) -> Component + Send + Sync>;

/// The code unit of one component namespace.
#[derive(Clone)]
pub struct ComponentUnit {
    namespace: String,
    info: Option<InfoFn>,
    hooks: HashMap<String, HookFn>,
    constructor: Constructor,
}

impl ComponentUnit {
    /// Create a unit for `namespace` whose instances are built by `constructor`.
    pub fn new<F>(namespace: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(Descriptor) -> Component + Send + Sync + 'static,
    {
        Self {
            namespace: namespace.into(),
            info: None,
            hooks: HashMap::new(),
            constructor: Arc::new(constructor),
        }
    }

    /// Attach the metadata function.
    pub fn with_info<F>(mut self, info: F) -> Self
    where
        F: Fn() -> Map<String, Value> + Send + Sync + 'static,
    {
        self.info = Some(Arc::new(info));
        self
    }

    /// Implement `hook`.
    pub fn with_hook<F>(mut self, hook: &str, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.hooks.insert(hook.to_string(), Arc::new(f));
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Output of the metadata function, if the unit has one.
    pub fn info(&self) -> Option<Map<String, Value>> {
        self.info.as_ref().map(|f| f())
    }

    pub fn hook(&self, hook: &str) -> Option<&HookFn> {
        self.hooks.get(hook)
    }

    pub fn construct(&self, descriptor: Descriptor) -> Component {
        (self.constructor)(descriptor)
    }
}

impl fmt::Debug for ComponentUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut hooks: Vec<&String> = self.hooks.keys().collect();
        hooks.sort();
        f.debug_struct("ComponentUnit")
            .field("namespace", &self.namespace)
            .field("info", &self.info.is_some())
            .field("hooks", &hooks)
            .finish()
    }
}
