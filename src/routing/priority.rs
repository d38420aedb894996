//! Tie-break between providers contributing the same pattern.
//!
//! # Rules
//! - An application entry wins outright
//! - Among modules the highest weight wins; a weighted entry beats any
//!   unweighted one; equal weights keep the first registered entry
//! - A core entry only wins when nothing else is registered
//! - Any other provider type is rejected

use crate::component::ComponentKind;
use crate::error::{LapurdError, Result};
use crate::routing::RouteEntry;

/// Provider ranks, lower wins.
pub const PROVIDER_PRIORITY: &[(ComponentKind, u8)] = &[
    (ComponentKind::Application, 0),
    (ComponentKind::Module, 1),
    (ComponentKind::Core, 2),
];

/// Rank of a provider type, or `UnsupportedProviderType`.
pub fn provider_rank(kind: ComponentKind) -> Result<u8> {
    PROVIDER_PRIORITY
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, rank)| *rank)
        .ok_or(LapurdError::UnsupportedProviderType(kind))
}

/// Whether a `candidate` weight beats the `current` one.
pub fn weight_outranks(candidate: Option<i64>, current: Option<i64>) -> bool {
    match (candidate, current) {
        (Some(c), Some(w)) => c > w,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

/// Pick the winning entry among those registered for one pattern.
///
/// Entries must be given in registration order. Every entry's provider
/// type is checked before a winner is returned.
pub fn select_entry<'a, I>(entries: I) -> Result<Option<&'a RouteEntry>>
where
    I: IntoIterator<Item = &'a RouteEntry>,
{
    let mut best: Option<(&RouteEntry, u8)> = None;

    for entry in entries {
        let rank = provider_rank(entry.provider.kind)?;
        best = match best {
            Some((current, current_rank)) if !outranks(entry, rank, current, current_rank) => {
                Some((current, current_rank))
            }
            _ => Some((entry, rank)),
        };
    }

    Ok(best.map(|(entry, _)| entry))
}

fn outranks(candidate: &RouteEntry, rank: u8, current: &RouteEntry, current_rank: u8) -> bool {
    if rank != current_rank {
        return rank < current_rank;
    }
    weight_outranks(candidate.spec.weight, current.spec.weight)
}
