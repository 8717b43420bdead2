//! CallMark: Call Transcript Keyword Annotation Engine
//!
//! A Rust/WASM implementation of the call-transcript annotation pipeline
//! used by the call dashboard to highlight keyword categories (money, debt,
//! income, hardship, objection, do-not-call, positive intent) in transcripts.
//!
//! # Architecture
//!
//! ## Annotation Pipeline (`annotator/`)
//! - `registry.rs` - Pattern Registry: ordered category definitions, compiled once
//! - `scanner.rs`  - Match Scanner: raw keyword/pattern occurrences per category
//! - `resolver.rs` - Overlap Resolver: greedy precedence + longest-match sweep
//! - `renderer.rs` - Segment Renderer: non-overlapping spans -> segments + legend
//! - `core.rs`     - TranscriptAnnotator: unified facade + WASM bindings
//!
//! ## Intake Extraction (`extract.rs`)
//! - Monetary amounts, employment status, and SSN last-four from free-form
//!   caller speech (the lexical half of the intake flow).
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { TranscriptAnnotator } from 'callmark';
//!
//! await init();
//!
//! // Default category set, or hydrate your own
//! const annotator = new TranscriptAnnotator({ show_full_legend: true });
//!
//! const result = annotator.annotate("I owe $5,000 in credit card debt");
//!
//! // result.segments: ordered plain/highlighted pieces of the transcript
//! // result.legend:   categories present, with label + style token
//! result.segments.forEach(seg => renderSegment(seg.kind, seg.text, seg.category_id));
//! ```

pub mod annotator;
pub mod extract;

pub use annotator::*;
pub use extract::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("callmark v{}", env!("CARGO_PKG_VERSION"))
}
