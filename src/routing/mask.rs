//! Segment masks for route patterns.
//!
//! # Responsibilities
//! - Split a path into its segments
//! - Encode which of the first [`MAX_SEGMENTS`] segments are literal as a bitmask
//! - Synthesize ancestor patterns of a concrete path from a mask
//!
//! # Design Decisions
//! - Bit `i` describes the `i`-th segment counted from the end, so the
//!   first segment is the most significant bit and masks rank patterns by
//!   specificity when compared numerically
//! - An all-wildcard pattern is treated as fully literal
//! - Segments past [`MAX_SEGMENTS`] are always literal, and a mask keeps
//!   the full segment count so patterns only match paths of equal depth

/// Segment matching any single concrete segment.
pub const WILDCARD: &str = "%";

/// Number of segments that take part in masking.
pub const MAX_SEGMENTS: usize = 7;

/// Split a path into its segments.
///
/// An empty path is a single empty segment.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').collect()
}

/// Compute the literal-segment mask of a path.
pub fn mask(path: &str) -> u32 {
    PathMask::of(path).bits()
}

/// A literal-segment mask together with the segment count it was computed for.
///
/// Ordering compares the bits first, so a descending walk over a sorted set
/// visits the most literal masks first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathMask {
    bits: u32,
    parts: usize,
}

impl PathMask {
    /// Mask of a path pattern.
    pub fn of(path: &str) -> Self {
        Self::from_segments(&segments(path))
    }

    /// Mask of already split segments.
    pub fn from_segments(parts: &[&str]) -> Self {
        let len = parts.len();
        let significant = len.min(MAX_SEGMENTS);
        let bits = parts[..significant]
            .iter()
            .enumerate()
            .filter(|(_, part)| **part != WILDCARD)
            .fold(0u32, |bits, (k, _)| bits | 1 << (significant - 1 - k));

        if bits == 0 {
            Self::literal(len)
        } else {
            Self { bits, parts: len }
        }
    }

    /// The fully literal mask for `parts` segments.
    pub fn literal(parts: usize) -> Self {
        Self {
            bits: (1u32 << parts.min(MAX_SEGMENTS)) - 1,
            parts,
        }
    }

    pub fn bits(self) -> u32 {
        self.bits
    }

    pub fn parts(self) -> usize {
        self.parts
    }

    /// Whether the segment at `index` (counted from the start) is literal.
    pub fn is_literal(self, index: usize) -> bool {
        let significant = self.parts.min(MAX_SEGMENTS);
        if index >= significant {
            return index < self.parts;
        }
        self.bits & (1 << (significant - 1 - index)) != 0
    }

    /// Build the pattern this mask selects out of a concrete path's segments.
    pub fn apply(self, parts: &[&str]) -> String {
        debug_assert_eq!(parts.len(), self.parts);
        parts
            .iter()
            .enumerate()
            .map(|(k, part)| if self.is_literal(k) { *part } else { WILDCARD })
            .collect::<Vec<_>>()
            .join("/")
    }
}
