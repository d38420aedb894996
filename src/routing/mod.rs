//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route registration (at build):
//!     `paths` hook of every provider
//!     → registry.rs add_path (entry per pattern per provider)
//!     → mask.rs (pattern → literal-segment mask, kept in a sorted set)
//!
//! Resolution (per request):
//!     concrete path
//!     → registry.rs ancestors (one candidate pattern per known mask)
//!     → first candidate with entries
//!     → priority.rs (application > weighted module > module > core)
//!     → redirect? resolve the target instead
//!     → router.rs call (instantiate provider, map arguments, capture output)
//! ```
//!
//! # Design Decisions
//! - No regex, no method-aware routing
//! - The registry is immutable once built; rebuilt when the set of
//!   components changes
//! - Deterministic: same registrations, same winner

pub mod arguments;
pub mod mask;
pub mod priority;
pub mod registry;
pub mod router;

pub use arguments::{map_arguments, Argument};
pub use mask::{mask, PathMask, MAX_SEGMENTS, WILDCARD};
pub use priority::{provider_rank, select_entry, weight_outranks};
pub use registry::{PathRegistry, ResolvedRoute, RouteEntry, RouteSpec};
pub use router::{call, call_entry};
