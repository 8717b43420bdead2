//! Overlap Resolver - greedy sweep over raw matches
//!
//! Turns an arbitrary (possibly heavily overlapping) raw match list into a
//! pairwise non-overlapping, start-ordered span set:
//!
//! 1. Sort by start ascending; ties by category precedence (lower registry
//!    index wins), then by longer match (prefer the more specific span).
//! 2. Sweep left to right with a frontier offset: accept a candidate iff it
//!    starts at or past the frontier, then advance the frontier to its end.
//!
//! Precedence order in the registry doubles as the overlap tie-break
//! policy, so callers control which category wins contested text by how
//! they order category definitions. This stage never fails: worst case it
//! discards matches, never corrupts offsets.

use serde::{Deserialize, Serialize};

use super::scanner::RawMatch;

// ==================== TYPE DEFINITIONS ====================

/// An accepted span. For any two spans A, B in the resolver's output,
/// either `A.end <= B.start` or `B.end <= A.start`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSpan {
    pub category_id: String,
    pub precedence: usize,
    pub start: usize,
    pub end: usize,
}

// ==================== MAIN IMPLEMENTATION ====================

/// Resolve overlaps into a non-overlapping, start-ordered span set
pub fn resolve(mut raw: Vec<RawMatch>) -> Vec<ResolvedSpan> {
    raw.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(a.precedence.cmp(&b.precedence))
            // Longer span first on a full tie
            .then(b.end.cmp(&a.end))
    });

    let mut spans = Vec::with_capacity(raw.len());
    let mut frontier = 0usize;

    for m in raw {
        if m.start >= frontier {
            frontier = m.end;
            spans.push(ResolvedSpan {
                category_id: m.category_id,
                precedence: m.precedence,
                start: m.start,
                end: m.end,
            });
        }
    }

    spans
}

// ==================== TESTS ====================
