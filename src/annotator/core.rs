//! TranscriptAnnotator - unified annotation facade
//!
//! Composes the four pipeline stages behind a single entry point:
//! text + registry -> raw matches -> resolved spans -> segments + legend.
//!
//! # Usage (JavaScript)
//! ```javascript,ignore
//! import init, { TranscriptAnnotator } from 'callmark';
//!
//! await init();
//! const annotator = new TranscriptAnnotator(null);   // default categories
//! annotator.hydrateCategories(categoriesJson);       // or tenant-specific ones
//! const result = annotator.annotate(transcriptText);
//! ```

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use super::registry::{CategoryDef, Registry};
use super::renderer::{render, LegendEntry, Segment};
use super::resolver::resolve;
use super::scanner::scan;

// ==================== TYPE DEFINITIONS ====================

/// Configuration for the TranscriptAnnotator
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct AnnotatorConfig {
    /// List every configured category in the legend, even with zero matches
    /// (consumers use this to render a static key)
    #[serde(default)]
    pub show_full_legend: bool,
}

/// Per-call statistics
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AnnotationStats {
    pub text_length: usize,
    pub raw_matches: usize,
    pub resolved_spans: usize,
    pub segments: usize,
    /// Filled at the WASM boundary; 0.0 for native calls
    pub annotate_time_ms: f64,
}

/// Full annotation result: ordered segments plus legend metadata.
///
/// `has_transcript: false` is the sentinel for a null/empty transcript -
/// a defined, successful outcome, never an error.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Annotation {
    pub segments: Vec<Segment>,
    pub legend: Vec<LegendEntry>,
    pub has_transcript: bool,
    pub stats: AnnotationStats,
}

impl Annotation {
    /// The sentinel empty result for a missing transcript
    fn no_transcript() -> Self {
        Self {
            segments: Vec::new(),
            legend: Vec::new(),
            has_transcript: false,
            stats: AnnotationStats {
                text_length: 0,
                raw_matches: 0,
                resolved_spans: 0,
                segments: 0,
                annotate_time_ms: 0.0,
            },
        }
    }
}

// ==================== PIPELINE ====================

/// Run the full pipeline over an optional transcript.
///
/// Pure and total: identical inputs always yield identical output, and no
/// input can make it fail given a valid registry. A `None` or empty
/// transcript short-circuits before the scanner and returns the sentinel.
pub fn annotate(
    transcript: Option<&str>,
    registry: &Registry,
    config: &AnnotatorConfig,
) -> Annotation {
    let text = match transcript {
        Some(t) if !t.is_empty() => t,
        _ => return Annotation::no_transcript(),
    };

    let raw = scan(text, registry);
    let raw_matches = raw.len();
    let spans = resolve(raw);
    let resolved_spans = spans.len();
    let (segments, legend) = render(text, &spans, registry, config.show_full_legend);

    Annotation {
        stats: AnnotationStats {
            text_length: text.len(),
            raw_matches,
            resolved_spans,
            segments: segments.len(),
            annotate_time_ms: 0.0,
        },
        segments,
        legend,
        has_transcript: true,
    }
}

// ==================== MAIN IMPLEMENTATION ====================

/// TranscriptAnnotator - call transcript annotation engine
///
/// Holds an immutable registry plus display options; every `annotate` call
/// allocates its own working state, so one annotator is safely shared.
#[wasm_bindgen]
pub struct TranscriptAnnotator {
    registry: Registry,
    config: AnnotatorConfig,
}

#[wasm_bindgen]
impl TranscriptAnnotator {
    /// Create an annotator over the default dashboard categories
    ///
    /// # Arguments
    /// * `config` - Optional JSON configuration object
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<TranscriptAnnotator, JsValue> {
        let config: AnnotatorConfig = if config.is_null() || config.is_undefined() {
            AnnotatorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };

        Ok(Self {
            registry: Registry::with_defaults(),
            config,
        })
    }

    /// Replace the category set (e.g. per-tenant definitions)
    ///
    /// # Arguments
    /// * `categories` - JSON array of CategoryDef objects
    #[wasm_bindgen(js_name = hydrateCategories)]
    pub fn hydrate_categories(&mut self, categories: JsValue) -> Result<(), JsValue> {
        let defs: Vec<CategoryDef> = serde_wasm_bindgen::from_value(categories)
            .map_err(|e| JsValue::from_str(&format!("Invalid categories: {}", e)))?;

        self.registry = Registry::build(defs)
            .map_err(|e| JsValue::from_str(&format!("Registry build error: {}", e)))?;

        Ok(())
    }

    /// Annotate a transcript
    ///
    /// # Arguments
    /// * `transcript` - The transcript text; null/undefined yields the
    ///   "no transcript" sentinel result
    #[wasm_bindgen(js_name = annotate)]
    pub fn annotate_js(&self, transcript: Option<String>) -> Result<JsValue, JsValue> {
        let t0 = js_sys::Date::now();

        let mut result = annotate(transcript.as_deref(), &self.registry, &self.config);
        result.stats.annotate_time_ms = js_sys::Date::now() - t0;

        serde_wasm_bindgen::to_value(&result)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Quick check if a transcript contains any category keywords
    #[wasm_bindgen(js_name = containsKeywords)]
    pub fn contains_keywords(&self, text: &str) -> bool {
        !scan(text, &self.registry).is_empty()
    }

    /// Number of configured categories
    #[wasm_bindgen(js_name = categoryCount)]
    pub fn category_count(&self) -> usize {
        self.registry.len()
    }

    /// Get annotator status
    #[wasm_bindgen(js_name = getStatus)]
    pub fn get_status(&self) -> JsValue {
        let status = serde_json::json!({
            "category_count": self.registry.len(),
            "category_ids": self.registry.categories().iter().map(|c| c.id.as_str()).collect::<Vec<_>>(),
            "config": {
                "show_full_legend": self.config.show_full_legend,
            }
        });

        JsValue::from_str(&status.to_string())
    }
}

// Native constructors (no JsValue plumbing)
impl TranscriptAnnotator {
    /// Build over an already-compiled registry
    pub fn with_registry(registry: Registry, config: AnnotatorConfig) -> Self {
        Self { registry, config }
    }

    /// Build over the default dashboard categories
    pub fn with_defaults() -> Self {
        Self::with_registry(Registry::with_defaults(), AnnotatorConfig::default())
    }

    /// Annotate a transcript (native path)
    pub fn run(&self, transcript: Option<&str>) -> Annotation {
        annotate(transcript, &self.registry, &self.config)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

// ==================== TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotator::registry::{CategoryDef, Matcher};
    use crate::annotator::renderer::SegmentKind;

    fn keyword_def(id: &str, keywords: &[&str]) -> CategoryDef {
        CategoryDef {
            id: id.to_string(),
            label: id.to_string(),
            style: format!("hl-{}", id),
            matcher: Matcher::Keywords(keywords.iter().map(|k| k.to_string()).collect()),
        }
    }

    fn reconstruct(annotation: &Annotation) -> String {
        annotation.segments.iter().map(|s| s.text.as_str()).collect()
    }

    fn highlighted<'a>(annotation: &'a Annotation) -> Vec<(&'a str, &'a str)> {
        annotation
            .segments
            .iter()
            .filter(|s| s.kind == SegmentKind::Highlighted)
            .map(|s| (s.category_id.as_deref().unwrap_or(""), s.text.as_str()))
            .collect()
    }

    #[test]
    fn test_config_defaults() {
        let config: AnnotatorConfig = serde_json::from_str("{}").unwrap();
        assert!(!config.show_full_legend);

        let config: AnnotatorConfig =
            serde_json::from_str(r#"{"show_full_legend": true}"#).unwrap();
        assert!(config.show_full_legend);
    }

    #[test]
    fn test_category_def_parsing() {
        let json = r#"{
            "id": "debt",
            "label": "Debt",
            "style": "hl-debt",
            "matcher": { "type": "keywords", "value": ["debt", "owe"] }
        }"#;
        let def: CategoryDef = serde_json::from_str(json).unwrap();

        assert_eq!(def.id, "debt");
        assert!(matches!(def.matcher, Matcher::Keywords(ref k) if k.len() == 2));
    }

    #[test]
    fn test_debt_call_scenario() {
        let annotator = TranscriptAnnotator::with_defaults();
        let text = "I owe $5,000 in credit card debt and I'm unemployed now";

        let annotation = annotator.run(Some(text));

        assert!(annotation.has_transcript);
        assert_eq!(reconstruct(&annotation), text);

        let hits = highlighted(&annotation);
        assert!(hits.contains(&("money", "$5,000")), "hits: {:?}", hits);
        assert!(hits.contains(&("debt", "debt")), "hits: {:?}", hits);
        assert!(hits.contains(&("hardship", "unemployed")), "hits: {:?}", hits);
    }

    #[test]
    fn test_do_not_call_scenario() {
        let annotator = TranscriptAnnotator::with_defaults();
        let text = "please stop calling me, I have a lawyer";

        let annotation = annotator.run(Some(text));

        let hits = highlighted(&annotation);
        assert!(hits.contains(&("do_not_call", "stop calling")), "hits: {:?}", hits);
        assert!(hits.contains(&("do_not_call", "lawyer")), "hits: {:?}", hits);
        assert_eq!(reconstruct(&annotation), text);
    }

    #[test]
    fn test_empty_and_null_transcripts_yield_sentinel() {
        let annotator = TranscriptAnnotator::with_defaults();

        for annotation in [annotator.run(Some("")), annotator.run(None)] {
            assert!(!annotation.has_transcript);
            assert!(annotation.segments.is_empty());
            assert!(annotation.legend.is_empty());
            assert_eq!(annotation.stats.text_length, 0);
        }
    }

    #[test]
    fn test_literal_matcher_semantics() {
        // "lost job" is not contiguous in this sentence, so hardship cannot
        // match; only the income keyword "job" fires
        let registry = Registry::build(vec![
            keyword_def("hardship", &["lost job"]),
            keyword_def("income", &["job"]),
        ])
        .unwrap();
        let annotator =
            TranscriptAnnotator::with_registry(registry, AnnotatorConfig::default());

        let annotation = annotator.run(Some("I lost my job last month"));

        assert_eq!(highlighted(&annotation), vec![("income", "job")]);
    }

    #[test]
    fn test_precedence_property() {
        // Both categories match "stop calling"-ish overlapping text at the
        // same start; the earlier registry entry wins, the other is absent
        // entirely, not partially rendered
        let registry = Registry::build(vec![
            keyword_def("first", &["stop calling"]),
            keyword_def("second", &["stop calling me"]),
        ])
        .unwrap();
        let annotator =
            TranscriptAnnotator::with_registry(registry, AnnotatorConfig::default());

        let annotation = annotator.run(Some("please stop calling me now"));

        assert_eq!(highlighted(&annotation), vec![("first", "stop calling")]);
    }

    #[test]
    fn test_longer_match_wins_on_precedence_tie() {
        let registry = Registry::build(vec![keyword_def("debt", &["credit", "credit card"])])
            .unwrap();
        let annotator =
            TranscriptAnnotator::with_registry(registry, AnnotatorConfig::default());

        let annotation = annotator.run(Some("my credit card"));

        assert_eq!(highlighted(&annotation), vec![("debt", "credit card")]);
    }

    #[test]
    fn test_determinism() {
        let annotator = TranscriptAnnotator::with_defaults();
        let text = "I owe $5,000 and they keep calling about my debt";

        assert_eq!(annotator.run(Some(text)), annotator.run(Some(text)));
    }

    #[test]
    fn test_reconstruction_and_non_overlap_over_samples() {
        let annotator = TranscriptAnnotator::with_defaults();
        let samples = [
            "I owe $5,000 in credit card debt and I'm unemployed now",
            "please stop calling me, I have a lawyer",
            "my salary is 50 thousand and I'm still behind on payments",
            "no keywords here at all",
            "debt",
            "DEBT DEBT debt",
            "   leading and trailing   ",
        ];

        for text in samples {
            let annotation = annotator.run(Some(text));
            assert_eq!(reconstruct(&annotation), text, "reconstruction failed for {:?}", text);

            // Highlighted segments never intersect: walk the segments and
            // check offsets are contiguous and strictly increasing
            let mut offset = 0usize;
            for segment in &annotation.segments {
                assert!(!segment.text.is_empty());
                offset += segment.text.len();
            }
            assert_eq!(offset, text.len());
        }
    }

    #[test]
    fn test_legend_reflects_present_categories() {
        let annotator = TranscriptAnnotator::with_defaults();
        let annotation = annotator.run(Some("my debt and my lawyer"));

        let ids: Vec<&str> = annotation.legend.iter().map(|e| e.category_id.as_str()).collect();
        assert_eq!(ids, vec!["debt", "do_not_call"]);
    }

    #[test]
    fn test_full_legend_mode() {
        let annotator = TranscriptAnnotator::with_registry(
            Registry::with_defaults(),
            AnnotatorConfig {
                show_full_legend: true,
            },
        );

        let annotation = annotator.run(Some("no keywords here"));

        assert_eq!(annotation.legend.len(), 7);
        assert_eq!(annotation.legend[0].category_id, "money");
        assert_eq!(annotation.legend[0].style, "hl-money");
    }

    #[test]
    fn test_stats_counts() {
        let annotator = TranscriptAnnotator::with_defaults();
        let annotation = annotator.run(Some("my debt is real"));

        assert_eq!(annotation.stats.text_length, 15);
        assert_eq!(annotation.stats.raw_matches, 1);
        assert_eq!(annotation.stats.resolved_spans, 1);
        assert_eq!(annotation.stats.segments, annotation.segments.len());
    }

    #[test]
    fn test_contains_keywords() {
        let annotator = TranscriptAnnotator::with_defaults();

        assert!(annotator.contains_keywords("drowning in debt"));
        assert!(!annotator.contains_keywords("sunny weather today"));
    }
}
