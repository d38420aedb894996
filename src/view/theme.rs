//! Page rendering through the active theme.

use crate::error::Result;
use crate::hooks::HookDispatcher;
use crate::routing::ResolvedRoute;
use crate::view::{View, ViewRegistry};

/// Name of the view every page is rendered through.
pub const PAGE_VIEW: &str = "page";

/// Naming schema derived from a path: lowercased, slashes become dashes.
pub fn path_schema(path: &str) -> String {
    path.to_lowercase()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Render the `page` view around a route's output.
///
/// A template named after the current path (`page--foo-bar.tpl.html`)
/// takes precedence over the plain page template.
pub fn render_page(
    content: &str,
    route: &ResolvedRoute,
    views: &ViewRegistry,
    dispatcher: &mut HookDispatcher<'_>,
    base_url: &str,
) -> Result<String> {
    let mut view = View::new(PAGE_VIEW, views)?;
    view.add_schema(path_schema(&route.path), route.entry.provider.clone(), 0);

    if let Some(title) = &route.entry.spec.page_title {
        view.set_variable("page_title", title.as_str());
    }

    view.theme(content, dispatcher, base_url)
}
