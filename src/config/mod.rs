//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! lapurd.toml
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LapurdConfig (validated)
//!     → Site::build (application metadata may still override theme/modules)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → server rebuilds the site and swaps it atomically
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - An invalid reload never replaces a working site

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{LapurdConfig, ObservabilityConfig, ServerConfig, SiteConfig};
pub use validation::{validate_config, ValidationError};
pub use watcher::ConfigWatcher;
