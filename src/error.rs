//! Error taxonomy for path resolution, hook dispatch and component loading.
//!
//! # Design Decisions
//! - One error enum for the whole request cycle; variants carry the data
//!   needed to render a useful message
//! - `RouteNotFound` is the only variant that degrades to a rendered page
//!   (404), everything else surfaces as a 500
//! - Hook and callback failures keep their source error

use thiserror::Error;

use crate::component::ComponentKind;

/// Error type returned by hook implementations and route callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result alias used throughout the crate.
pub type Result<T, E = LapurdError> = std::result::Result<T, E>;

/// Errors that can occur while building a site or handling a request.
#[derive(Debug, Error)]
pub enum LapurdError {
    /// No registered pattern matches the requested path.
    #[error("no route can be found for path '{path}'")]
    RouteNotFound { path: String },

    /// The winning route names a callback its provider does not expose.
    #[error("invalid callback '{callback}' on component '{component}'")]
    InvalidCallback { callback: String, component: String },

    /// A route entry is owned by a provider type that cannot own routes.
    #[error("unsupported component type '{0}'")]
    UnsupportedProviderType(ComponentKind),

    /// The code unit of a component is not registered.
    #[error("no component {kind} '{name}' can be found")]
    ComponentNotFound { kind: ComponentKind, name: String },

    /// A redirect chain revisits a pattern or exceeds the redirect limit.
    #[error("redirect cycle detected: {}", .chain.join(" -> "))]
    RedirectCycle { chain: Vec<String> },

    /// A hook implementation returned an error.
    #[error("hook '{hook}' of '{provider}' failed: {source}")]
    HookFailed {
        hook: String,
        provider: String,
        source: BoxError,
    },

    /// A hook returned data of the wrong shape.
    #[error("hook '{hook}' of '{provider}' returned an invalid result: {reason}")]
    InvalidHookResult {
        hook: String,
        provider: String,
        reason: String,
    },

    /// A route callback returned an error; its output is discarded.
    #[error("callback '{callback}' of '{component}' failed: {source}")]
    CallbackFailed {
        callback: String,
        component: String,
        source: BoxError,
    },

    /// Neither the settings nor the application activated a theme.
    #[error("no theme has been activated")]
    ThemeNotConfigured,

    #[error("view '{0}' can not be found")]
    ViewNotFound(String),

    #[error("no template can be found for view '{0}'")]
    TemplateNotFound(String),

    /// The active theme added a naming schema to a view.
    #[error("themes are not supposed to add name schemas, got '{0}'")]
    ThemeSchema(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LapurdError {
    /// HTTP status code this error should be reported with.
    pub fn status(&self) -> u16 {
        match self {
            LapurdError::RouteNotFound { .. } => PageNotFound::STATUS,
            _ => 500,
        }
    }

    /// Returns the renderable not-found condition for `RouteNotFound`.
    pub fn page_not_found(&self) -> Option<PageNotFound> {
        match self {
            LapurdError::RouteNotFound { .. } => Some(PageNotFound),
            _ => None,
        }
    }
}

/// The "page not found" condition raised when resolution yields nothing.
///
/// The caller emits [`PageNotFound::STATUS_LINE`] and the body returned by
/// [`PageNotFound::error_page`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageNotFound;

impl PageNotFound {
    pub const STATUS: u16 = 404;
    pub const STATUS_LINE: &'static str = "HTTP/1.0 404 Not Found";

    /// Body of the error page.
    pub fn error_page(&self) -> &'static str {
        "<h1>404 Page Not Found</h1>The page you requested can not be found."
    }
}
