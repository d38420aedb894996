//! Site bootstrap and the request cycle.
//!
//! # Data Flow
//! ```text
//! Site::build (startup and every config reload):
//!     application (its metadata may choose theme and modules)
//!     → modules in enable order → core → theme
//!     → every unit verified against the catalog
//!     → PathRegistry::build + ViewRegistry::build via `paths` / `views`
//!
//! Site::handle (per request):
//!     q → request_path (default `index`, trailing `/` trimmed, alias)
//!     → Cycle: fresh resolver and hooker cache
//!     → `init` hook → resolve → call → theme renders the page
//! ```
//!
//! # Design Decisions
//! - Registries are built once per site and only read while handling
//!   requests; a new configuration builds a new site
//! - Component instances never outlive a cycle
//! - An unmatched path renders the core's not-found page with status 404

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::component::{Catalog, ComponentResolver, Descriptor, Providers, Roots};
use crate::config::SiteConfig;
use crate::error::{LapurdError, PageNotFound, Result};
use crate::hooks::HookDispatcher;
use crate::routing::{router, PathRegistry, ResolvedRoute, RouteEntry, RouteSpec};
use crate::view::{render_page, ViewRegistry};

/// Path served when the request names none.
pub const DEFAULT_PATH: &str = "index";

/// Callback of the core that renders the not-found page.
pub const NOT_FOUND_CALLBACK: &str = "handlePageNotFound";

/// A rendered response body with its status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub status: u16,
    /// The path that was resolved, after alias rewriting.
    pub path: String,
    pub body: String,
}

impl Page {
    pub fn is_not_found(&self) -> bool {
        self.status == PageNotFound::STATUS
    }
}

/// An assembled site: its components and the registries built from them.
#[derive(Debug)]
pub struct Site {
    catalog: Arc<Catalog>,
    providers: Providers,
    paths: PathRegistry,
    views: ViewRegistry,
    base_url: String,
}

impl Site {
    /// Assemble a site from its settings.
    pub fn build(config: &SiteConfig, catalog: Arc<Catalog>) -> Result<Self> {
        let roots = Roots::new(&config.system_root, &config.lapurd_root, &config.application);

        let mut application = Descriptor::application(&config.application, &roots);
        let unit = catalog.unit(&application)?;

        let mut theme = config.theme.clone();
        let mut modules = config.modules.clone();
        if let Some(info) = unit.info() {
            if let Some(Value::String(name)) = info.get("theme") {
                theme = Some(name.clone());
            }
            if let Some(Value::Array(names)) = info.get("modules") {
                modules = names.iter().filter_map(|n| n.as_str().map(str::to_string)).collect();
            }
            for (key, value) in info {
                application.info.entry(key).or_insert(value);
            }
        }

        let modules = modules
            .iter()
            .map(|name| verified(&catalog, Descriptor::module(name, &roots)))
            .collect::<Result<Vec<_>>>()?;
        let core = verified(&catalog, Descriptor::core(&roots))?;
        let theme = theme.ok_or(LapurdError::ThemeNotConfigured)?;
        let theme = verified(&catalog, Descriptor::theme(&theme, &roots))?;

        let providers = Providers {
            core,
            modules,
            application: Arc::new(application),
            theme,
        };

        let mut paths = PathRegistry::with_max_redirects(config.max_redirects);
        for (alias, path) in &config.aliases {
            paths.add_alias(alias, path);
        }
        let mut views = ViewRegistry::new();
        {
            let mut dispatcher = HookDispatcher::new(&catalog, &providers);
            paths.build(&mut dispatcher)?;
            views.build(&mut dispatcher)?;
        }

        tracing::info!(
            application = %providers.application.name,
            theme = %providers.theme.name,
            modules = ?providers.modules.iter().map(|m| m.name.as_str()).collect::<Vec<_>>(),
            routes = paths.len(),
            "Site built"
        );

        Ok(Self {
            catalog,
            providers,
            paths,
            views,
            base_url: config.base_url.clone(),
        })
    }

    /// The path a request addresses.
    pub fn request_path(&self, q: Option<&str>) -> String {
        let path = match q {
            Some(q) => q.trim_end_matches('/'),
            None => DEFAULT_PATH,
        };
        let path = if path.is_empty() { DEFAULT_PATH } else { path };
        self.paths.resolve_alias(path)
    }

    /// Start a request cycle.
    pub fn cycle(&self) -> Cycle<'_> {
        Cycle {
            id: Uuid::new_v4(),
            site: self,
            resolver: ComponentResolver::new(&self.catalog),
            dispatcher: HookDispatcher::new(&self.catalog, &self.providers),
        }
    }

    /// Produce the page for the `q` request parameter.
    pub fn handle(&self, q: Option<&str>) -> Result<Page> {
        let path = self.request_path(q);
        self.cycle().run(&path)
    }

    pub fn providers(&self) -> &Providers {
        &self.providers
    }

    pub fn paths(&self) -> &PathRegistry {
        &self.paths
    }

    pub fn views(&self) -> &ViewRegistry {
        &self.views
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Shared handle on the catalog, for rebuilding the site.
    pub fn shared_catalog(&self) -> Arc<Catalog> {
        self.catalog.clone()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn verified(catalog: &Catalog, descriptor: Descriptor) -> Result<Arc<Descriptor>> {
    catalog.unit(&descriptor)?;
    Ok(Arc::new(descriptor))
}

/// State that lives for one request.
pub struct Cycle<'a> {
    id: Uuid,
    site: &'a Site,
    resolver: ComponentResolver<'a>,
    dispatcher: HookDispatcher<'a>,
}

impl<'a> Cycle<'a> {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Resolve `path` without calling anything.
    pub fn resolve(&self, path: &str) -> Result<ResolvedRoute> {
        self.site.paths.resolve(path)
    }

    pub fn dispatcher(&mut self) -> &mut HookDispatcher<'a> {
        &mut self.dispatcher
    }

    /// Handle `path` from `init` to the themed page.
    pub fn run(mut self, path: &str) -> Result<Page> {
        let span = tracing::info_span!("cycle", id = %self.id, path);
        let _enter = span.enter();

        self.dispatcher.invoke_all("init", &[])?;

        let route = match self.resolve(path) {
            Ok(route) => route,
            Err(LapurdError::RouteNotFound { .. }) => return self.not_found(path),
            Err(e) => return Err(e),
        };

        let content = router::call(&route, &mut self.resolver)?;

        self.resolver.resolve(&self.site.providers.theme)?;
        let body = render_page(
            &content,
            &route,
            &self.site.views,
            &mut self.dispatcher,
            &self.site.base_url,
        )?;

        tracing::debug!(instances = self.resolver.cached(), "Cycle finished");
        Ok(Page {
            status: 200,
            path: path.to_string(),
            body,
        })
    }

    fn not_found(mut self, path: &str) -> Result<Page> {
        tracing::info!(path, "Page not found");
        let entry = RouteEntry {
            pattern: path.to_string(),
            provider: self.site.providers.core.clone(),
            spec: RouteSpec {
                callback: Some(NOT_FOUND_CALLBACK.to_string()),
                ..Default::default()
            },
        };

        let body = match router::call_entry(&entry, path, &mut self.resolver) {
            Ok(body) => body,
            Err(LapurdError::InvalidCallback { .. }) => PageNotFound.error_page().to_string(),
            Err(e) => return Err(e),
        };

        Ok(Page {
            status: PageNotFound::STATUS,
            path: path.to_string(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;
    use crate::component::{Component, ComponentUnit};
    use serde_json::json;
    use std::path::PathBuf;

    fn root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    }

    fn config() -> SiteConfig {
        SiteConfig {
            application: "HelloWorld".into(),
            system_root: root(),
            lapurd_root: root(),
            ..Default::default()
        }
    }

    fn site() -> Site {
        Site::build(&config(), Arc::new(builtin::catalog())).unwrap()
    }

    #[test]
    fn test_application_metadata_enables_components() {
        let site = site();
        assert_eq!(site.providers().theme.name, "Bar");
        assert_eq!(site.providers().modules.len(), 1);
        assert_eq!(site.providers().modules[0].name, "Foo");
        assert_eq!(site.providers().application.info.get("theme"), Some(&json!("Bar")));
    }

    #[test]
    fn test_request_path() {
        let mut config = config();
        config.aliases.insert("home".into(), "index".into());
        let site = Site::build(&config, Arc::new(builtin::catalog())).unwrap();

        assert_eq!(site.request_path(None), "index");
        assert_eq!(site.request_path(Some("foo/bar/")), "foo/bar");
        assert_eq!(site.request_path(Some("/")), "index");
        assert_eq!(site.request_path(Some("home")), "index");
    }

    #[test]
    fn test_index_is_served_by_application_through_theme() {
        let page = site().handle(None).unwrap();
        assert_eq!(page.status, 200);
        assert!(page.body.contains("Hello World!"));
        assert!(!page.body.contains("<h1>Hello World!</h1>"));
        assert!(page.body.contains("This is from theme 'Bar'."));
    }

    #[test]
    fn test_module_route_maps_segment() {
        let page = site().handle(Some("foo/bar")).unwrap();
        assert!(page.body.contains("You are saying: 'bar'!"));

        let page = site().handle(Some("foo")).unwrap();
        assert!(page.body.contains("You are saying: 'Foo'!"));
    }

    #[test]
    fn test_literal_module_route_beats_wildcard() {
        let page = site().handle(Some("foo/about")).unwrap();
        assert_eq!(page.status, 200);
        assert!(page.body.contains("This is Foo module, saying 'foo'!"));
    }

    #[test]
    fn test_unknown_path_is_404() {
        let page = site().handle(Some("baz")).unwrap();
        assert!(page.is_not_found());
        assert_eq!(page.body, "<h1>404 Page Not Found</h1>The page you requested can not be found.");
    }

    #[test]
    fn test_missing_theme_fails_build() {
        let catalog = Catalog::new()
            .with(ComponentUnit::new("lapurd::core", Component::new))
            .with(ComponentUnit::new("lapurd::application::Bare", Component::new));
        let config = SiteConfig {
            application: "Bare".into(),
            ..Default::default()
        };
        assert!(matches!(
            Site::build(&config, Arc::new(catalog)),
            Err(LapurdError::ThemeNotConfigured)
        ));
    }

    #[test]
    fn test_missing_module_fails_build() {
        let mut config = config();
        config.application = "Bare".into();
        config.theme = Some("Bar".into());
        config.modules = vec!["Ghost".into()];
        let catalog = builtin::catalog().with(ComponentUnit::new("lapurd::application::Bare", Component::new));

        let err = Site::build(&config, Arc::new(catalog)).unwrap_err();
        assert!(matches!(err, LapurdError::ComponentNotFound { ref name, .. } if name == "Ghost"));
    }

    #[test]
    fn test_core_front_page_without_application_route() {
        let mut config = config();
        config.application = "Bare".into();
        config.theme = Some("Bar".into());
        let catalog = builtin::catalog().with(ComponentUnit::new("lapurd::application::Bare", Component::new));
        let site = Site::build(&config, Arc::new(catalog)).unwrap();

        let page = site.handle(None).unwrap();
        assert!(page.body.contains("<h1>Hello World!</h1>"));
        assert!(page.body.contains("<title>Hello World</title>"));
    }

    #[test]
    fn test_failing_init_hook_aborts_cycle() {
        let mut config = config();
        config.application = "Broken".into();
        config.theme = Some("Bar".into());
        let catalog = builtin::catalog().with(
            ComponentUnit::new("lapurd::application::Broken", Component::new).with_hook("init", |_| Err("no database".into())),
        );
        let site = Site::build(&config, Arc::new(catalog)).unwrap();

        let err = site.handle(None).unwrap_err();
        assert!(matches!(err, LapurdError::HookFailed { ref hook, .. } if hook == "init"));
        assert_eq!(err.status(), 500);
    }
}
