//! Registry of named views.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::component::Descriptor;
use crate::error::{LapurdError, Result};
use crate::hooks::HookDispatcher;

/// Which provider declares each view.
#[derive(Debug, Clone, Default)]
pub struct ViewRegistry {
    views: HashMap<String, Arc<Descriptor>>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the views every provider declares in its `views` hook.
    ///
    /// A view declared twice belongs to the later provider.
    pub fn build(&mut self, dispatcher: &mut HookDispatcher<'_>) -> Result<()> {
        dispatcher.invoke_all_with("views", &[], |result, provider| {
            let names = match result {
                Value::Array(names) => names,
                Value::Null => return Ok(()),
                other => {
                    return Err(LapurdError::InvalidHookResult {
                        hook: "views".to_string(),
                        provider: provider.namespace.clone(),
                        reason: format!("expected a list of view names, got {}", other),
                    })
                }
            };

            for name in names {
                match name {
                    Value::String(name) => self.add_view(name, provider.clone()),
                    other => {
                        return Err(LapurdError::InvalidHookResult {
                            hook: "views".to_string(),
                            provider: provider.namespace.clone(),
                            reason: format!("view names must be strings, got {}", other),
                        })
                    }
                }
            }
            Ok(())
        })?;

        tracing::info!(views = self.views.len(), "View registry built");
        Ok(())
    }

    pub fn add_view(&mut self, name: impl Into<String>, provider: Arc<Descriptor>) {
        self.views.insert(name.into(), provider);
    }

    /// The provider of a view.
    pub fn view(&self, name: &str) -> Option<&Arc<Descriptor>> {
        self.views.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.views.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
