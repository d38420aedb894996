//! The set of components a site is assembled from.

use std::iter;
use std::sync::Arc;

use crate::component::Descriptor;

/// The active components of a site.
#[derive(Debug, Clone)]
pub struct Providers {
    pub core: Arc<Descriptor>,
    /// Enabled modules in their configured order.
    pub modules: Vec<Arc<Descriptor>>,
    pub application: Arc<Descriptor>,
    pub theme: Arc<Descriptor>,
}

impl Providers {
    /// Components in hook precedence order: core, modules, application.
    pub fn hook_order(&self) -> impl Iterator<Item = &Arc<Descriptor>> {
        iter::once(&self.core)
            .chain(self.modules.iter())
            .chain(iter::once(&self.application))
    }

    pub fn module(&self, name: &str) -> Option<&Arc<Descriptor>> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Directories a template of `provider` is searched in, in order.
    ///
    /// The application and the theme can override any template; the
    /// provider itself is the fallback.
    pub fn template_providers(&self, provider: &Arc<Descriptor>) -> Vec<Arc<Descriptor>> {
        let mut providers = vec![self.application.clone(), self.theme.clone()];
        if !provider.same_as(&self.application) {
            providers.push(provider.clone());
        }
        providers
    }
}
