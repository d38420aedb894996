//! View subsystem.
//!
//! # Data Flow
//! ```text
//! `views` hook of every provider
//!     → registry.rs (view name → declaring provider)
//!
//! theme.rs render_page(content, route)
//!     → themable.rs View "page" + path schema (page--foo-bar)
//!     → `view_<name>_schemas` hooks add more schemas
//!     → candidates: heaviest schema first, plain view name last
//!     → first template found in views/ of application → theme → provider
//!     → `view_<name>_render` hooks (provider, theme, application)
//!     → template.rs placeholder substitution
//! ```
//!
//! # Design Decisions
//! - The application and the theme can override any template
//! - Themes render views but never add naming schemas
//! - Render hooks exchange variables as a JSON object

pub mod registry;
pub mod template;
pub mod themable;
pub mod theme;

pub use registry::ViewRegistry;
pub use themable::{hook_name, Candidate, Schema, View, TEMPLATE_EXTENSION};
pub use theme::{path_schema, render_page, PAGE_VIEW};
