//! Registry of the code units available to a site.

use std::collections::HashMap;
use std::sync::Arc;

use crate::component::{ComponentUnit, Descriptor};
use crate::error::{LapurdError, Result};
use crate::hooks::HookFn;

/// All known code units keyed by namespace.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    units: HashMap<String, Arc<ComponentUnit>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a unit, replacing any previous unit of the same namespace.
    pub fn register(&mut self, unit: ComponentUnit) -> &mut Self {
        self.units.insert(unit.namespace().to_string(), Arc::new(unit));
        self
    }

    /// Builder form of [`Catalog::register`].
    pub fn with(mut self, unit: ComponentUnit) -> Self {
        self.register(unit);
        self
    }

    /// Load the unit of a component.
    pub fn unit(&self, descriptor: &Descriptor) -> Result<&Arc<ComponentUnit>> {
        self.units
            .get(&descriptor.namespace)
            .ok_or_else(|| LapurdError::ComponentNotFound {
                kind: descriptor.kind,
                name: descriptor.name.clone(),
            })
    }

    /// The implementation of `hook` in `namespace`, if any.
    pub fn hook(&self, namespace: &str, hook: &str) -> Option<&HookFn> {
        self.units.get(namespace).and_then(|unit| unit.hook(hook))
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.units.contains_key(namespace)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
