//! Intake extraction - lexical field extraction from caller speech
//!
//! The intake flow collects structured fields (loan amount, debt amounts,
//! monthly income, employment status, SSN last-four) from free-form
//! answers. These are the pure text halves of those steps:
//! - amounts: numeric forms ("50000", "$50,000", "50k", "1.5 million") and
//!   written numbers ("fifty thousand", "two hundred fifty thousand")
//! - employment status: keyword classification
//! - SSN last-four: first standalone 4-digit group

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

// ==================== TYPE DEFINITIONS ====================

/// Employment status classes the intake flow distinguishes
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
    FixedIncome,
    Unemployed,
}

impl EmploymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentStatus::Employed => "employed",
            EmploymentStatus::SelfEmployed => "self_employed",
            EmploymentStatus::FixedIncome => "fixed_income",
            EmploymentStatus::Unemployed => "unemployed",
        }
    }
}

// ==================== MAIN IMPLEMENTATION ====================

/// IntakeExtractor - field extraction over transcript snippets
///
/// All patterns are compiled once at construction; extraction itself is
/// pure and allocation-light.
#[wasm_bindgen]
pub struct IntakeExtractor {
    /// "50 thousand", "50k", "1.5 million", "1m"
    suffixed_amount_re: Regex,
    /// bare numeric: "50000", "50000.00" (input is pre-stripped of , and $)
    plain_amount_re: Regex,
    /// standalone 4-digit group
    ssn_re: Regex,
}

impl Default for IntakeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl IntakeExtractor {
    /// Create a new IntakeExtractor with all patterns compiled
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let suffixed_amount_re = RegexBuilder::new(r"(\d+(?:\.\d+)?)\s*(thousand|million|[km])\b")
            .case_insensitive(true)
            .build()
            .unwrap();
        let plain_amount_re = Regex::new(r"(\d+(?:\.\d+)?)").unwrap();
        let ssn_re = Regex::new(r"\b(\d{4})\b").unwrap();

        Self {
            suffixed_amount_re,
            plain_amount_re,
            ssn_re,
        }
    }

    /// Extract a monetary amount from free-form speech
    ///
    /// Tries suffixed numerics first ("50k", "50 thousand"), then bare
    /// numerics, then written numbers ("fifty thousand"). Returns None
    /// when nothing amount-like is present.
    #[wasm_bindgen(js_name = extractAmount)]
    pub fn extract_amount(&self, text: &str) -> Option<f64> {
        let text = text.to_lowercase().replace([',', '$'], "");

        if let Some(cap) = self.suffixed_amount_re.captures(&text) {
            let value: f64 = cap[1].parse().ok()?;
            let multiplier = match &cap[2] {
                "thousand" | "k" => 1_000.0,
                _ => 1_000_000.0,
            };
            return Some(value * multiplier);
        }

        if let Some(cap) = self.plain_amount_re.captures(&text) {
            return cap[1].parse().ok();
        }

        words_to_amount(&text)
    }

    /// Extract employment status as a string token (WASM surface)
    #[wasm_bindgen(js_name = extractEmploymentStatus)]
    pub fn extract_employment_status(&self, text: &str) -> Option<String> {
        self.employment_status(text).map(|s| s.as_str().to_string())
    }

    /// Extract the last 4 digits of an SSN
    #[wasm_bindgen(js_name = extractSsnLastFour)]
    pub fn extract_ssn_last_four(&self, text: &str) -> Option<String> {
        self.ssn_re
            .captures(text)
            .map(|cap| cap[1].to_string())
    }
}

// Native helpers
impl IntakeExtractor {
    /// Classify employment status from keywords.
    ///
    /// Self-employment and fixed-income phrases are checked before the bare
    /// employment words so "self employed" and "disability" are not
    /// shadowed by "employed"/"work"; unemployment phrases likewise come
    /// before them ("not working" contains "work").
    pub fn employment_status(&self, text: &str) -> Option<EmploymentStatus> {
        let text = text.to_lowercase();
        let contains_any =
            |words: &[&str]| words.iter().any(|w| text.contains(w));

        if contains_any(&["self employed", "self-employed", "business", "contractor", "freelance"]) {
            Some(EmploymentStatus::SelfEmployed)
        } else if contains_any(&[
            "fixed income",
            "disability",
            "pension",
            "retirement",
            "social security",
        ]) {
            Some(EmploymentStatus::FixedIncome)
        } else if contains_any(&["unemployed", "not working", "no job"]) {
            Some(EmploymentStatus::Unemployed)
        } else if contains_any(&["paycheck", "employed", "job", "work", "salary", "wage"]) {
            Some(EmploymentStatus::Employed)
        } else {
            None
        }
    }
}

/// Parse written amounts: "fifty thousand" = 50000, "fifty hundred" = 5000,
/// "ten thousand five hundred" = 10500. Non-number words are skipped.
/// Returns None when no number word appears at all.
fn words_to_amount(text: &str) -> Option<f64> {
    let mut total: u64 = 0;
    let mut current: u64 = 0;
    let mut matched = false;

    for word in text.split_whitespace() {
        let Some(value) = number_word(word) else {
            continue;
        };
        matched = true;

        match value {
            100 => {
                if current == 0 {
                    current = 100;
                } else {
                    current *= 100;
                }
            }
            1_000 => {
                if current == 0 {
                    current = 1;
                }
                total += current * 1_000;
                current = 0;
            }
            1_000_000 => {
                if current == 0 {
                    current = 1;
                }
                total += current * 1_000_000;
                current = 0;
            }
            v => current += v,
        }
    }

    total += current;
    matched.then_some(total as f64)
}

fn number_word(word: &str) -> Option<u64> {
    let value = match word {
        "zero" => 0,
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        "thirteen" => 13,
        "fourteen" => 14,
        "fifteen" => 15,
        "sixteen" => 16,
        "seventeen" => 17,
        "eighteen" => 18,
        "nineteen" => 19,
        "twenty" => 20,
        "thirty" => 30,
        "forty" => 40,
        "fifty" => 50,
        "sixty" => 60,
        "seventy" => 70,
        "eighty" => 80,
        "ninety" => 90,
        "hundred" => 100,
        "thousand" => 1_000,
        "million" => 1_000_000,
        _ => return None,
    };
    Some(value)
}

// ==================== TESTS ====================
