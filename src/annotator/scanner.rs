//! Match Scanner - raw match collection per category
//!
//! Runs every category's engine over the transcript, left to right,
//! case-insensitively, with no limit on match count. Matches from different
//! categories are not coordinated here - overlaps across categories are
//! expected and deferred to the resolver.
//!
//! Output order is stable: registry (precedence) order, then ascending
//! start offset, so identical inputs always yield identical results.

use serde::{Deserialize, Serialize};

use super::registry::{MatchEngine, Registry};

// ==================== TYPE DEFINITIONS ====================

/// A single raw occurrence of a category's matcher in the transcript.
///
/// `start`/`end` are half-open byte offsets into the original text;
/// `text` is the exact matched slice (original casing preserved).
/// `precedence` is the category's registry index, recorded so the
/// resolver can tie-break without registry access.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RawMatch {
    pub category_id: String,
    pub precedence: usize,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

// ==================== MAIN IMPLEMENTATION ====================

/// Collect every raw match for every category, in registry order.
///
/// Within one category matches are non-overlapping by construction
/// (`find_iter` semantics in both engines); across categories they may
/// overlap freely. Empty text yields an empty list.
pub fn scan(text: &str, registry: &Registry) -> Vec<RawMatch> {
    let mut matches = Vec::new();
    if text.is_empty() {
        return matches;
    }

    for (precedence, category) in registry.categories().iter().enumerate() {
        match &category.engine {
            MatchEngine::Keywords(automaton) => {
                for m in automaton.find_iter(text) {
                    // Keyword hits count only on word boundaries:
                    // "employed" must not fire inside "unemployed"
                    if !on_word_boundary(text, m.start(), m.end()) {
                        continue;
                    }
                    matches.push(RawMatch {
                        category_id: category.id.clone(),
                        precedence,
                        start: m.start(),
                        end: m.end(),
                        text: text[m.start()..m.end()].to_string(),
                    });
                }
            }
            MatchEngine::Pattern(regex) => {
                for m in regex.find_iter(text) {
                    matches.push(RawMatch {
                        category_id: category.id.clone(),
                        precedence,
                        start: m.start(),
                        end: m.end(),
                        text: m.as_str().to_string(),
                    });
                }
            }
        }
    }

    matches
}

/// True if neither edge of `[start, end)` touches an alphanumeric neighbor
fn on_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();

    !before.is_some_and(|c| c.is_alphanumeric()) && !after.is_some_and(|c| c.is_alphanumeric())
}

// ==================== TESTS ====================
