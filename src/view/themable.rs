//! A named view and the template chain it is rendered through.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::component::{Descriptor, Providers};
use crate::error::{LapurdError, Result};
use crate::hooks::HookDispatcher;
use crate::view::{template, ViewRegistry};

/// Extension of every template file.
pub const TEMPLATE_EXTENSION: &str = "tpl.html";

/// An alternative template name for a view, added by a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub schema: String,
    pub provider: Arc<Descriptor>,
    pub weight: i64,
}

/// A template name to try and the directories to search it in.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// `<view>` or `<view>--<schema>`.
    pub schema: String,
    pub provider: Arc<Descriptor>,
    pub filename: String,
    pub providers: Vec<Arc<Descriptor>>,
}

/// Shape of one entry returned by a `view_<name>_schemas` hook.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SchemaSpec {
    Name(String),
    Weighted {
        schema: String,
        #[serde(default)]
        weight: i64,
    },
}

/// A themable element rendered through a template.
#[derive(Debug, Clone)]
pub struct View {
    name: String,
    provider: Arc<Descriptor>,
    schemas: Vec<Schema>,
    variables: Map<String, Value>,
}

impl View {
    /// Look up a registered view.
    pub fn new(name: &str, registry: &ViewRegistry) -> Result<Self> {
        let provider = registry
            .view(name)
            .ok_or_else(|| LapurdError::ViewNotFound(name.to_string()))?;

        Ok(Self {
            name: name.to_string(),
            provider: provider.clone(),
            schemas: Vec::new(),
            variables: Map::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn provider(&self) -> &Arc<Descriptor> {
        &self.provider
    }

    /// Add a naming schema.
    ///
    /// `provider` must ship `<view>--<schema>.tpl.html` in its `views/`
    /// directory unless the application or the theme overrides it.
    pub fn add_schema(&mut self, schema: impl Into<String>, provider: Arc<Descriptor>, weight: i64) {
        self.schemas.push(Schema {
            schema: schema.into(),
            provider,
            weight,
        });
    }

    pub fn schemas(&self) -> &[Schema] {
        &self.schemas
    }

    pub fn set_variable(&mut self, name: &str, value: impl Into<Value>) {
        self.variables.insert(name.to_string(), value.into());
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    pub fn variables(&self) -> &Map<String, Value> {
        &self.variables
    }

    /// Template candidates, heaviest schema first, the view's own name last.
    pub fn candidates(&self, providers: &Providers) -> Vec<Candidate> {
        let mut schemas: Vec<&Schema> = self.schemas.iter().collect();
        schemas.sort_by(|a, b| b.weight.cmp(&a.weight));

        schemas
            .into_iter()
            .map(|s| (format!("{}--{}", self.name, s.schema), &s.provider))
            .chain(std::iter::once((self.name.clone(), &self.provider)))
            .map(|(schema, provider)| Candidate {
                filename: format!("{}.{}", schema, TEMPLATE_EXTENSION),
                schema,
                provider: provider.clone(),
                providers: providers.template_providers(provider),
            })
            .collect()
    }

    /// The first candidate whose template exists, with the template's path.
    pub fn find_template(&self, providers: &Providers) -> Result<(Candidate, PathBuf)> {
        for candidate in self.candidates(providers) {
            let found = candidate
                .providers
                .iter()
                .map(|p| p.views_dir().join(&candidate.filename))
                .find(|path| path.is_file());

            if let Some(path) = found {
                tracing::debug!(view = %self.name, template = %path.display(), "Template selected");
                return Ok((candidate, path));
            }
        }
        Err(LapurdError::TemplateNotFound(self.name.clone()))
    }

    /// Render the view around `content`.
    pub fn theme(&mut self, content: &str, dispatcher: &mut HookDispatcher<'_>, base_url: &str) -> Result<String> {
        self.collect_schemas(dispatcher)?;

        let providers = dispatcher.providers().clone();
        let (candidate, path) = self.find_template(&providers)?;

        let hook = hook_name(&self.name, "render");
        let provider = self.provider.clone();
        self.apply_render_hook(dispatcher, &hook, &provider)?;
        self.apply_render_hook(dispatcher, &hook, &providers.theme)?;
        self.apply_render_hook(dispatcher, &hook, &providers.application)?;

        if candidate.schema != self.name {
            if candidate.provider.same_as(&providers.theme) {
                return Err(LapurdError::ThemeSchema(candidate.schema));
            }

            let hook = hook_name(&candidate.schema, "render");
            self.apply_render_hook(dispatcher, &hook, &candidate.provider)?;
            self.apply_render_hook(dispatcher, &hook, &providers.theme)?;
            if !candidate.provider.same_as(&providers.application) {
                self.apply_render_hook(dispatcher, &hook, &providers.application)?;
            }
        }

        self.set_variable("content", content);
        self.set_variable("base_url", base_url);
        self.variables
            .entry("page_title")
            .or_insert_with(|| Value::String(String::new()));

        template::render_file(&path, &self.variables)
    }

    fn collect_schemas(&mut self, dispatcher: &mut HookDispatcher<'_>) -> Result<()> {
        let hook = hook_name(&self.name, "schemas");
        let current: Vec<Value> = self
            .schemas
            .iter()
            .map(|s| serde_json::json!({"schema": s.schema, "weight": s.weight}))
            .collect();

        let schemas = &mut self.schemas;
        dispatcher.invoke_all_with(&hook, &[Value::Array(current)], |result, provider| {
            if result.is_null() {
                return Ok(());
            }
            let specs: Vec<SchemaSpec> = serde_json::from_value(result).map_err(|e| LapurdError::InvalidHookResult {
                hook: hook.clone(),
                provider: provider.namespace.clone(),
                reason: e.to_string(),
            })?;

            for spec in specs {
                let (schema, weight) = match spec {
                    SchemaSpec::Name(schema) => (schema, 0),
                    SchemaSpec::Weighted { schema, weight } => (schema, weight),
                };
                schemas.push(Schema {
                    schema,
                    provider: provider.clone(),
                    weight,
                });
            }
            Ok(())
        })
    }

    fn apply_render_hook(&mut self, dispatcher: &HookDispatcher<'_>, hook: &str, provider: &Descriptor) -> Result<()> {
        let variables = Value::Object(self.variables.clone());
        match dispatcher.invoke(hook, provider, &[variables])? {
            Some(Value::Object(changes)) => {
                self.variables.extend(changes);
                Ok(())
            }
            Some(Value::Null) | None => Ok(()),
            Some(other) => Err(LapurdError::InvalidHookResult {
                hook: hook.to_string(),
                provider: provider.namespace.clone(),
                reason: format!("expected a mapping of variables, got {}", other),
            }),
        }
    }
}

/// `view_<name>_<suffix>`, with dashes in the name turned into underscores.
pub fn hook_name(view: &str, suffix: &str) -> String {
    format!("view_{}_{}", view.replace('-', "_"), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Catalog, Component, ComponentUnit, Roots};
    use serde_json::json;
    use std::fs;

    struct Fixture {
        _dir: tempfile::TempDir,
        providers: Providers,
        registry: ViewRegistry,
    }

    /// Core at `<root>`, module Foo under `<root>/modules`, theme T under
    /// `<root>/themes`, application at `<root>/application`.
    fn fixture(files: &[(&str, &str)]) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        for (path, body) in files {
            let path = dir.path().join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, body).unwrap();
        }
        let roots = Roots::new(dir.path(), dir.path(), "App");
        let providers = Providers {
            core: Arc::new(Descriptor::core(&roots)),
            modules: vec![Arc::new(Descriptor::module("Foo", &roots))],
            application: Arc::new(Descriptor::application("App", &roots)),
            theme: Arc::new(Descriptor::theme("T", &roots)),
        };
        let mut registry = ViewRegistry::new();
        registry.add_view("page", providers.core.clone());
        Fixture {
            _dir: dir,
            providers,
            registry,
        }
    }

    fn empty_catalog() -> Catalog {
        Catalog::new()
    }

    #[test]
    fn test_candidates_are_ordered_by_weight() {
        let f = fixture(&[]);
        let mut view = View::new("page", &f.registry).unwrap();
        let foo = f.providers.modules[0].clone();
        view.add_schema("light", foo.clone(), 1);
        view.add_schema("heavy", foo.clone(), 10);

        let candidates = view.candidates(&f.providers);
        let names: Vec<&str> = candidates.iter().map(|c| c.filename.as_str()).collect();
        assert_eq!(names, vec!["page--heavy.tpl.html", "page--light.tpl.html", "page.tpl.html"]);

        let dirs: Vec<&str> = candidates[0].providers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(dirs, vec!["App", "T", "Foo"]);
    }

    #[test]
    fn test_unknown_view() {
        let f = fixture(&[]);
        assert!(matches!(View::new("nope", &f.registry), Err(LapurdError::ViewNotFound(_))));
    }

    #[test]
    fn test_theme_overrides_provider_template() {
        let f = fixture(&[
            ("views/page.tpl.html", "core:{{ content }}"),
            ("themes/T/views/page.tpl.html", "theme:{{ content }}"),
        ]);
        let catalog = empty_catalog();
        let mut dispatcher = HookDispatcher::new(&catalog, &f.providers);
        let mut view = View::new("page", &f.registry).unwrap();
        assert_eq!(view.theme("x", &mut dispatcher, "/").unwrap(), "theme:x");
    }

    #[test]
    fn test_schema_template_wins_when_present() {
        let f = fixture(&[
            ("views/page.tpl.html", "core"),
            ("modules/Foo/views/page--foo.tpl.html", "foo:{{ content }}"),
        ]);
        let catalog = empty_catalog();
        let mut dispatcher = HookDispatcher::new(&catalog, &f.providers);
        let mut view = View::new("page", &f.registry).unwrap();
        view.add_schema("foo", f.providers.modules[0].clone(), 0);
        view.add_schema("missing", f.providers.modules[0].clone(), 5);
        assert_eq!(view.theme("x", &mut dispatcher, "/").unwrap(), "foo:x");
    }

    #[test]
    fn test_missing_template() {
        let f = fixture(&[]);
        let catalog = empty_catalog();
        let mut dispatcher = HookDispatcher::new(&catalog, &f.providers);
        let mut view = View::new("page", &f.registry).unwrap();
        assert!(matches!(view.theme("", &mut dispatcher, "/"), Err(LapurdError::TemplateNotFound(_))));
    }

    #[test]
    fn test_render_hooks_run_in_order_and_merge() {
        let f = fixture(&[("views/page.tpl.html", "{{ who }}|{{ title }}|{{ base_url }}")]);
        let catalog = Catalog::new()
            .with(
                ComponentUnit::new("lapurd::core", Component::new)
                    .with_hook("view_page_render", |_| Ok(json!({"who": "core", "title": "T"}))),
            )
            .with(ComponentUnit::new("lapurd::theme::T", Component::new).with_hook("view_page_render", |args| {
                let seen = args[0]["who"].as_str().unwrap_or_default().to_string();
                Ok(json!({"who": format!("{}+theme", seen)}))
            }))
            .with(
                ComponentUnit::new("lapurd::application::App", Component::new)
                    .with_hook("view_page_render", |_| Ok(Value::Null)),
            );
        let mut dispatcher = HookDispatcher::new(&catalog, &f.providers);
        let mut view = View::new("page", &f.registry).unwrap();
        assert_eq!(view.theme("", &mut dispatcher, "/base").unwrap(), "core+theme|T|/base");
    }

    #[test]
    fn test_schemas_hook_adds_schema() {
        let f = fixture(&[
            ("views/page.tpl.html", "plain"),
            ("modules/Foo/views/page--wide.tpl.html", "wide"),
        ]);
        let catalog = Catalog::new().with(
            ComponentUnit::new("lapurd::module::Foo", Component::new)
                .with_hook("view_page_schemas", |_| Ok(json!([{"schema": "wide", "weight": 2}]))),
        );
        let mut dispatcher = HookDispatcher::new(&catalog, &f.providers);
        let mut view = View::new("page", &f.registry).unwrap();
        assert_eq!(view.theme("", &mut dispatcher, "/").unwrap(), "wide");
        assert_eq!(view.schemas()[0].provider.name, "Foo");
    }

    #[test]
    fn test_theme_schema_is_rejected() {
        let f = fixture(&[("themes/T/views/page--dark.tpl.html", "dark")]);
        let catalog = empty_catalog();
        let mut dispatcher = HookDispatcher::new(&catalog, &f.providers);
        let mut view = View::new("page", &f.registry).unwrap();
        view.add_schema("dark", f.providers.theme.clone(), 0);
        assert!(matches!(view.theme("", &mut dispatcher, "/"), Err(LapurdError::ThemeSchema(_))));
    }

    #[test]
    fn test_hook_names() {
        assert_eq!(hook_name("page-not-found", "render"), "view_page_not_found_render");
        assert_eq!(hook_name("page--foo-bar", "render"), "view_page__foo_bar_render");
    }
}
