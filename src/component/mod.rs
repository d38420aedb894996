//! Component subsystem.
//!
//! # Data Flow
//! ```text
//! settings (application, modules, theme)
//!     → descriptor.rs (name → namespace, directory, include)
//!     → catalog.rs (namespace → compiled unit, or ComponentNotFound)
//!     → resolver.rs (unit + info → cached instance, one per namespace)
//! ```
//!
//! # Design Decisions
//! - Components are compiled in; a unit's hook table is the capability
//!   registry, fixed at startup
//! - Instances are cached per request cycle only
//! - Callbacks write to a captured [`Output`], never to the response directly

pub mod catalog;
pub mod descriptor;
pub mod instance;
pub mod output;
pub mod providers;
pub mod resolver;
pub mod unit;

pub use catalog::Catalog;
pub use descriptor::{ComponentKind, Descriptor, Roots, CORE_NAME, CORE_NAMESPACE};
pub use instance::{Callback, Component};
pub use output::Output;
pub use providers::Providers;
pub use resolver::ComponentResolver;
pub use unit::ComponentUnit;
