//! Lapurd: a hook-driven web micro-framework.
//!
//! Components (the core, modules, one application and one theme) declare
//! paths and views through hooks. A request's path is resolved through a
//! wildcard route table to a component callback, whose output the theme
//! renders into a page.

pub mod builtin;
pub mod component;
pub mod config;
pub mod error;
pub mod hooks;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod site;
pub mod view;

pub use config::LapurdConfig;
pub use error::{LapurdError, PageNotFound, Result};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use site::{Page, Site};
