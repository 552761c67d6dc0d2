//! Field-specification extraction and the reduction pipeline
//!
//! Large documents are cut down to the sections most likely to define
//! fields before they are sent for generation:
//!
//! ```text
//! raw → normalize → cutoff → extract_field_specs → reduced text
//! ```
//!
//! Extraction is a fold over lines carrying a `ScanState`. Sections start
//! at heading lines, accumulate a keyword score, and survive only when the
//! score reaches [`MIN_SECTION_SCORE`].

use crate::cutoff::{count_field_headers, cutoff};
use crate::normalize::normalize;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info};

/// Inputs shorter than this (characters) skip extraction
pub const SHORT_CIRCUIT_CHARS: usize = 3000;

/// Extraction results shorter than this (characters) are discarded
pub const MIN_EXTRACT_CHARS: usize = 100;

/// Score a section needs to be kept
pub const MIN_SECTION_SCORE: u32 = 2;

const HEADING_BONUS: u32 = 5;
const HIGH_VALUE_WEIGHT: u32 = 3;
const MEDIUM_VALUE_WEIGHT: u32 = 1;

const HEADING_KEYWORDS: &[&str] = &[
    "field",
    "specification",
    "requirement",
    "data model",
    "schema",
    "relationship",
    "lookup",
    "formula",
    "picklist",
    "__c",
];

const HIGH_VALUE_KEYWORDS: &[&str] = &[
    "field label",
    "field type",
    "api name",
    "lookup",
    "formula",
    "picklist",
    "master-detail",
    "master detail",
    "help text",
    "description",
    "relationship",
    "precision",
    "scale",
    "reference to",
    "referenceto",
];

const MEDIUM_VALUE_KEYWORDS: &[&str] = &[
    "field",
    "type",
    "label",
    "required",
    "help",
    "values",
    "formula",
    "relationship",
    "length",
    "default",
    "__c",
    "external id",
    "unique",
];

static BULLET_WITH_COLON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[-*+]|\d+\.)\s+.*:").expect("valid bullet regex"));

/// Fold state of the line scan
#[derive(Debug, Default)]
struct ScanState<'a> {
    sections: Vec<String>,
    current: Vec<&'a str>,
    score: u32,
    in_high_value: bool,
}

impl<'a> ScanState<'a> {
    fn step(mut self, line: &'a str) -> Self {
        let trimmed = line.trim();

        if is_section_heading(trimmed) {
            self.flush();
            self.in_high_value = heading_is_high_value(trimmed);
            self.score = if self.in_high_value { HEADING_BONUS } else { 0 };
            self.current.push(line);
        } else if trimmed.is_empty() {
            if !self.in_high_value && self.score < 1 && self.current.len() > 3 {
                self.current.clear();
                self.score = 0;
            } else {
                self.current.push(line);
            }
        } else {
            self.score += line_score(trimmed);
            self.current.push(line);
        }

        self
    }

    fn flush(&mut self) {
        if self.score >= MIN_SECTION_SCORE {
            let section = self.current.join("\n");
            let section = section.trim();
            if !section.is_empty() {
                self.sections.push(section.to_string());
            }
        }
        self.current.clear();
        self.score = 0;
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.sections
    }
}

/// Keep only the sections of a document that look like field definitions
///
/// Inputs under [`SHORT_CIRCUIT_CHARS`] come back unchanged, as does the
/// input whenever the extracted text would fall below [`MIN_EXTRACT_CHARS`].
pub fn extract_field_specs(text: &str) -> String {
    let chars = text.chars().count();
    if chars < SHORT_CIRCUIT_CHARS {
        debug!("Skipping extraction for short input ({} chars)", chars);
        return text.to_string();
    }

    let sections = scan_sections(text);
    let extracted = sections.join("\n\n");
    let extracted_chars = extracted.chars().count();

    if extracted_chars < MIN_EXTRACT_CHARS {
        info!(
            "Extraction kept only {} chars from {} sections, using full text",
            extracted_chars,
            sections.len()
        );
        return text.to_string();
    }

    debug!(
        "Extracted {} sections ({} of {} chars)",
        sections.len(),
        extracted_chars,
        chars
    );
    extracted
}

/// Retained sections, in document order
fn scan_sections(text: &str) -> Vec<String> {
    text.split('\n')
        .fold(ScanState::default(), ScanState::step)
        .finish()
}

fn is_section_heading(trimmed: &str) -> bool {
    trimmed.starts_with("##") || trimmed.starts_with("**")
}

fn heading_is_high_value(trimmed: &str) -> bool {
    let lower = trimmed.to_lowercase();
    HEADING_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

fn line_score(trimmed: &str) -> u32 {
    let lower = trimmed.to_lowercase();
    let hits = |keywords: &[&str]| -> u32 {
        keywords
            .iter()
            .filter(|keyword| lower.contains(*keyword))
            .count() as u32
    };

    let mut score = hits(HIGH_VALUE_KEYWORDS) * HIGH_VALUE_WEIGHT
        + hits(MEDIUM_VALUE_KEYWORDS) * MEDIUM_VALUE_WEIGHT;

    if BULLET_WITH_COLON.is_match(trimmed) {
        score += 2;
    }
    score += lower.matches("__c").count() as u32;
    if lower.contains("(default)") {
        score += 2;
    }
    if trimmed.starts_with('|') && trimmed[1..].contains('|') {
        score += 2;
    }
    if trimmed.starts_with("```") {
        score += 1;
    }

    score
}

/// Character counts through each reduction stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReductionStats {
    /// Raw input
    pub original_chars: usize,
    /// After normalization
    pub normalized_chars: usize,
    /// After the section cutoff
    pub cutoff_chars: usize,
    /// After extraction (the text sent for generation)
    pub extracted_chars: usize,
    /// Numbered field headers found in the normalized input
    pub field_headers: usize,
}

impl ReductionStats {
    /// Fraction of the raw input that was removed, 0.0 to 1.0
    pub fn removed_ratio(&self) -> f64 {
        if self.original_chars == 0 {
            return 0.0;
        }
        1.0 - (self.extracted_chars as f64 / self.original_chars as f64)
    }
}

/// Output of [`reduce_document`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReducedDocument {
    /// Reduced text
    pub text: String,
    /// Stage statistics
    pub stats: ReductionStats,
}

/// Run normalize, cutoff and extraction over a raw document
pub fn reduce_document(raw: &str) -> ReducedDocument {
    reduce_normalized(raw.chars().count(), &normalize(raw))
}

/// Cutoff and extraction over already normalized text
pub(crate) fn reduce_normalized(original_chars: usize, normalized: &str) -> ReducedDocument {
    let field_headers = count_field_headers(normalized);
    let cut = cutoff(normalized);
    let text = extract_field_specs(cut);

    let stats = ReductionStats {
        original_chars,
        normalized_chars: normalized.chars().count(),
        cutoff_chars: cut.chars().count(),
        extracted_chars: text.chars().count(),
        field_headers,
    };

    info!(
        "Reduced document {} -> {} -> {} -> {} chars ({} field headers)",
        stats.original_chars,
        stats.normalized_chars,
        stats.cutoff_chars,
        stats.extracted_chars,
        stats.field_headers
    );

    ReducedDocument { text, stats }
}
