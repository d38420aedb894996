//! Hook subsystem.
//!
//! # Data Flow
//! ```text
//! hook name
//!     → dispatcher.rs (enumerate implementers: core → modules → application)
//!     → each implementation called with the same JSON arguments
//!     → merge.rs (accumulate) or caller callback (e.g. PathRegistry::add_path)
//! ```
//!
//! # Design Decisions
//! - Hook arguments and results are `serde_json::Value`, so hooks with
//!   different shapes share one dispatcher
//! - Absence of an implementation is a no-op; failures propagate

pub mod dispatcher;
pub mod merge;

use std::sync::Arc;

use serde_json::Value;

use crate::error::BoxError;

pub use dispatcher::{HookDispatcher, Hooker};
pub use merge::{merge_recursive, HookResults};

/// A hook implementation.
pub type HookFn = Arc<dyn Fn(&[Value]) -> Result<Value, BoxError> + Send + Sync>;
