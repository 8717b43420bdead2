//! Pattern Registry - compiled category definitions
//!
//! Holds the ordered set of keyword categories. Each category carries one of
//! two matching engines:
//! - Keyword lists compiled into an Aho-Corasick automaton
//!   (LeftmostLongest, ASCII case-insensitive)
//! - Regex patterns compiled case-insensitively
//!
//! Construction is fail-fast: an invalid matcher definition fails
//! `Registry::build` immediately, so a scanner can never exist over a
//! partially invalid registry. Registry order is significant - it is the
//! precedence order used by the overlap resolver (lower index wins
//! contested text).

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

// ==================== TYPE DEFINITIONS ====================

/// How a category decides which substrings belong to it
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Matcher {
    /// Literal keyword/phrase list, matched on word boundaries
    Keywords(Vec<String>),
    /// Regex source, compiled case-insensitively
    Pattern(String),
}

/// Category definition as supplied by the caller (JSON-hydratable)
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CategoryDef {
    pub id: String,
    pub label: String,
    /// Opaque styling token, passed through to the legend and segments untouched
    pub style: String,
    pub matcher: Matcher,
}

/// Errors raised while building a registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry has no categories")]
    Empty,
    #[error("duplicate category id `{0}`")]
    DuplicateId(String),
    #[error("category `{id}`: invalid pattern: {source}")]
    InvalidPattern {
        id: String,
        #[source]
        source: Box<regex::Error>,
    },
    #[error("category `{id}`: keyword list is empty")]
    NoKeywords { id: String },
    #[error("category `{id}`: keyword `{keyword}` is too short (min 2 chars)")]
    KeywordTooShort { id: String, keyword: String },
    #[error("category `{id}`: automaton build failed: {message}")]
    AutomatonBuild { id: String, message: String },
}

/// Compiled matching engine for one category
#[derive(Clone, Debug)]
pub(crate) enum MatchEngine {
    Keywords(AhoCorasick),
    Pattern(Regex),
}

/// A compiled category: display metadata plus its matching engine
#[derive(Clone, Debug)]
pub struct Category {
    pub id: String,
    pub label: String,
    pub style: String,
    pub(crate) engine: MatchEngine,
}

// ==================== MAIN IMPLEMENTATION ====================

/// Immutable, ordered set of compiled categories.
///
/// Built once, then treated as a value: it is never mutated and is
/// `Send + Sync`, so a single registry can back concurrent annotation calls.
#[derive(Clone, Debug)]
pub struct Registry {
    categories: Vec<Category>,
}

impl Registry {
    /// Compile and validate a set of category definitions.
    ///
    /// Fails fast on the first invalid definition: bad regex, empty keyword
    /// list, sub-2-char keyword (high false-positive rate), or duplicate id.
    pub fn build(defs: Vec<CategoryDef>) -> Result<Self, RegistryError> {
        if defs.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen_ids: HashSet<String> = HashSet::new();
        let mut categories = Vec::with_capacity(defs.len());

        for def in defs {
            if !seen_ids.insert(def.id.clone()) {
                return Err(RegistryError::DuplicateId(def.id));
            }

            let engine = match &def.matcher {
                Matcher::Keywords(keywords) => {
                    let normalized = normalize_keywords(&def.id, keywords)?;
                    let automaton = AhoCorasickBuilder::new()
                        .match_kind(MatchKind::LeftmostLongest)
                        .ascii_case_insensitive(true)
                        .build(&normalized)
                        .map_err(|e| RegistryError::AutomatonBuild {
                            id: def.id.clone(),
                            message: e.to_string(),
                        })?;
                    MatchEngine::Keywords(automaton)
                }
                Matcher::Pattern(source) => {
                    let regex = RegexBuilder::new(source)
                        .case_insensitive(true)
                        .build()
                        .map_err(|e| RegistryError::InvalidPattern {
                            id: def.id.clone(),
                            source: Box::new(e),
                        })?;
                    MatchEngine::Pattern(regex)
                }
            };

            categories.push(Category {
                id: def.id,
                label: def.label,
                style: def.style,
                engine,
            });
        }

        Ok(Self { categories })
    }

    /// Build the production category set of the call dashboard
    pub fn with_defaults() -> Self {
        // Static definitions, known-good
        Self::build(default_categories()).expect("default categories are valid")
    }

    /// Categories in precedence order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by id
    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Lowercase and trim keywords; reject empties and 1-char entries
fn normalize_keywords(id: &str, keywords: &[String]) -> Result<Vec<String>, RegistryError> {
    if keywords.is_empty() {
        return Err(RegistryError::NoKeywords { id: id.to_string() });
    }

    let mut normalized = Vec::with_capacity(keywords.len());
    for keyword in keywords {
        let trimmed = keyword.trim();
        if trimmed.len() < 2 {
            return Err(RegistryError::KeywordTooShort {
                id: id.to_string(),
                keyword: keyword.clone(),
            });
        }
        normalized.push(trimmed.to_lowercase());
    }
    Ok(normalized)
}

// ==================== DEFAULT CATEGORIES ====================

/// The category set shipped with the dashboard: one entry per keyword class
/// the intake flow cares about. Order doubles as overlap precedence.
pub fn default_categories() -> Vec<CategoryDef> {
    vec![
        CategoryDef {
            id: "money".to_string(),
            label: "Money".to_string(),
            style: "hl-money".to_string(),
            // $5,000 / 50k / 50 thousand / 200 dollars
            matcher: Matcher::Pattern(
                r"\$\s*\d[\d,]*(?:\.\d+)?|\b\d[\d,]*(?:\.\d+)?\s*(?:dollars?|bucks|grand|thousand|million|[km])\b"
                    .to_string(),
            ),
        },
        CategoryDef {
            id: "debt".to_string(),
            label: "Debt".to_string(),
            style: "hl-debt".to_string(),
            matcher: Matcher::Keywords(vec![
                "debt".to_string(),
                "owe".to_string(),
                "credit card".to_string(),
                "loan".to_string(),
                "collections".to_string(),
                "collection agency".to_string(),
                "past due".to_string(),
                "behind on payments".to_string(),
                "creditor".to_string(),
                "balance".to_string(),
            ]),
        },
        CategoryDef {
            id: "income".to_string(),
            label: "Income".to_string(),
            style: "hl-income".to_string(),
            matcher: Matcher::Keywords(vec![
                "income".to_string(),
                "paycheck".to_string(),
                "salary".to_string(),
                "wages".to_string(),
                "employed".to_string(),
                "job".to_string(),
                "pension".to_string(),
                "social security".to_string(),
                "disability".to_string(),
            ]),
        },
        CategoryDef {
            id: "hardship".to_string(),
            label: "Hardship".to_string(),
            style: "hl-hardship".to_string(),
            matcher: Matcher::Keywords(vec![
                "unemployed".to_string(),
                "not working".to_string(),
                "no job".to_string(),
                "laid off".to_string(),
                "lost my job".to_string(),
                "can't afford".to_string(),
                "cannot afford".to_string(),
                "struggling".to_string(),
                "hardship".to_string(),
                "medical bills".to_string(),
                "behind on rent".to_string(),
            ]),
        },
        CategoryDef {
            id: "objection".to_string(),
            label: "Objection".to_string(),
            style: "hl-objection".to_string(),
            matcher: Matcher::Keywords(vec![
                "not interested".to_string(),
                "no thanks".to_string(),
                "scam".to_string(),
                "too expensive".to_string(),
                "already have".to_string(),
                "don't need".to_string(),
                "do not need".to_string(),
            ]),
        },
        CategoryDef {
            id: "do_not_call".to_string(),
            label: "Do Not Call".to_string(),
            style: "hl-dnc".to_string(),
            matcher: Matcher::Keywords(vec![
                "stop calling".to_string(),
                "do not call".to_string(),
                "don't call".to_string(),
                "take me off".to_string(),
                "remove me".to_string(),
                "do not contact".to_string(),
                "lawyer".to_string(),
                "attorney".to_string(),
                "cease and desist".to_string(),
                "harassment".to_string(),
            ]),
        },
        CategoryDef {
            id: "positive".to_string(),
            label: "Positive Intent".to_string(),
            style: "hl-positive".to_string(),
            matcher: Matcher::Keywords(vec![
                "interested".to_string(),
                "sign me up".to_string(),
                "sounds good".to_string(),
                "let's do it".to_string(),
                "tell me more".to_string(),
                "get started".to_string(),
                "that works".to_string(),
            ]),
        },
    ]
}

// ==================== TESTS ====================
