//! Component instances and their callbacks.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::component::{Descriptor, Output};
use crate::error::BoxError;

/// A named handler a route can point at.
pub type Callback = Arc<dyn Fn(&[String], &mut Output) -> Result<(), BoxError> + Send + Sync>;

/// An instantiated component.
pub struct Component {
    descriptor: Descriptor,
    callbacks: HashMap<String, Callback>,
}

impl Component {
    pub fn new(descriptor: Descriptor) -> Self {
        Self {
            descriptor,
            callbacks: HashMap::new(),
        }
    }

    /// Expose a callback under `name`.
    pub fn with_callback<F>(mut self, name: &str, callback: F) -> Self
    where
        F: Fn(&[String], &mut Output) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.callbacks.insert(name.to_string(), Arc::new(callback));
        self
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn callback(&self, name: &str) -> Option<&Callback> {
        self.callbacks.get(name)
    }

    /// A metadata value supplied by the component's `info` function.
    pub fn info(&self, key: &str) -> Option<&Value> {
        self.descriptor.info.get(key)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut callbacks: Vec<&String> = self.callbacks.keys().collect();
        callbacks.sort();
        f.debug_struct("Component")
            .field("namespace", &self.descriptor.namespace)
            .field("callbacks", &callbacks)
            .finish()
    }
}
