//! Per-cycle component instantiation.

use std::collections::HashMap;
use std::sync::Arc;

use crate::component::{Catalog, Component, Descriptor};
use crate::error::Result;

/// Resolves descriptors to instances, one instance per namespace.
///
/// The cache lives as long as the resolver, which is one request cycle.
#[derive(Debug)]
pub struct ComponentResolver<'a> {
    catalog: &'a Catalog,
    instances: HashMap<String, Arc<Component>>,
}

impl<'a> ComponentResolver<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            instances: HashMap::new(),
        }
    }

    /// Return the instance of a component, constructing it on first use.
    pub fn resolve(&mut self, descriptor: &Descriptor) -> Result<Arc<Component>> {
        if let Some(instance) = self.instances.get(&descriptor.namespace) {
            return Ok(instance.clone());
        }

        let unit = self.catalog.unit(descriptor)?;

        let mut descriptor = descriptor.clone();
        if let Some(info) = unit.info() {
            for (key, value) in info {
                descriptor.info.entry(key).or_insert(value);
            }
        }

        tracing::debug!(
            namespace = %descriptor.namespace,
            kind = %descriptor.kind,
            "Component instantiated"
        );

        let instance = Arc::new(unit.construct(descriptor));
        self.instances.insert(instance.descriptor().namespace.clone(), instance.clone());
        Ok(instance)
    }

    /// Number of instances constructed so far.
    pub fn cached(&self) -> usize {
        self.instances.len()
    }
}
