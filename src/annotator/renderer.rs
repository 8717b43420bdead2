//! Segment Renderer - spans + original text -> segments + legend
//!
//! Walks the resolved spans in order, emitting plain segments for the gaps
//! and highlighted segments for the spans themselves. Concatenating the
//! segment texts in order reproduces the transcript exactly - that is the
//! structural invariant of the whole pipeline.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::registry::Registry;
use super::resolver::ResolvedSpan;

// ==================== TYPE DEFINITIONS ====================

/// Kind of rendered segment
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Plain,
    Highlighted,
}

/// One ordered piece of the transcript, plain or classified
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

/// Legend entry for a category present in (or, in full-legend mode,
/// configured for) the current annotation
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LegendEntry {
    pub category_id: String,
    pub label: String,
    pub style: String,
}

// ==================== MAIN IMPLEMENTATION ====================

/// Render resolved spans over the original text.
///
/// The legend lists categories actually present, deduplicated, in
/// first-appearance order; under `full_legend` it lists every registry
/// category in registry order regardless of use (for rendering a static key).
pub fn render(
    text: &str,
    spans: &[ResolvedSpan],
    registry: &Registry,
    full_legend: bool,
) -> (Vec<Segment>, Vec<LegendEntry>) {
    let mut segments = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0usize;

    for span in spans {
        if span.start > cursor {
            segments.push(Segment {
                kind: SegmentKind::Plain,
                text: text[cursor..span.start].to_string(),
                category_id: None,
            });
        }
        segments.push(Segment {
            kind: SegmentKind::Highlighted,
            text: text[span.start..span.end].to_string(),
            category_id: Some(span.category_id.clone()),
        });
        cursor = span.end;
    }

    if cursor < text.len() {
        segments.push(Segment {
            kind: SegmentKind::Plain,
            text: text[cursor..].to_string(),
            category_id: None,
        });
    }

    let legend = if full_legend {
        registry.categories().iter().map(legend_entry).collect()
    } else {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut legend = Vec::new();
        for span in spans {
            if seen.insert(span.category_id.as_str()) {
                if let Some(category) = registry.get(&span.category_id) {
                    legend.push(legend_entry(category));
                }
            }
        }
        legend
    };

    (segments, legend)
}

fn legend_entry(category: &super::registry::Category) -> LegendEntry {
    LegendEntry {
        category_id: category.id.clone(),
        label: category.label.clone(),
        style: category.style.clone(),
    }
}

// ==================== TESTS ====================
