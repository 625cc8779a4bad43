//! Value objects produced by the engine. All of them are built fresh per call
//! and serialize directly to the wire format expected by callers.

use std::fmt;

use serde::Serialize;

/// Watermark character category. The priority order used to pick one is
/// encoded in `classifier::categorize`, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "Control Character")]
    Control,
    #[serde(rename = "Invisible Character")]
    Invisible,
    #[serde(rename = "Suspicious Spacing")]
    SuspiciousSpacing,
    #[serde(rename = "Other Suspicious")]
    OtherSuspicious,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Control => "Control Character",
            Category::Invisible => "Invisible Character",
            Category::SuspiciousSpacing => "Suspicious Spacing",
            Category::OtherSuspicious => "Other Suspicious",
        };
        write!(f, "{name}")
    }
}

/// Detection confidence derived from watermark density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        };
        write!(f, "{name}")
    }
}

/// One distinct watermark character found in the input.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedWatermark {
    /// Display form, e.g. `<U+200B>` or `<NBSP>`.
    pub character: String,
    /// 4-digit zero-padded uppercase hex, e.g. `U+200B`.
    pub unicode_point: String,
    pub name: String,
    pub count: usize,
    pub category: Category,
}

/// Aggregate counts for one scrub call.
///
/// Invariant: `characters_removed` equals the sum of the four per-category
/// counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrubStats {
    pub original_length: usize,
    pub cleaned_length: usize,
    pub characters_removed: usize,
    pub watermarks_detected: bool,
    pub control_characters_found: usize,
    pub invisible_characters_found: usize,
    pub suspicious_characters_found: usize,
    pub spacing_characters_found: usize,
    /// Percent reduction of the text, rounded to 2 decimal places.
    pub compression_ratio: f64,
}

/// Heuristic analysis of the detected watermarks.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub has_control_characters: bool,
    pub has_invisible_characters: bool,
    pub has_suspicious_spacing: bool,
    /// Triggered pattern names, in trigger-check order.
    pub suspicious_patterns: Vec<String>,
    pub confidence: Confidence,
}

impl Default for Analysis {
    fn default() -> Self {
        Self {
            has_control_characters: false,
            has_invisible_characters: false,
            has_suspicious_spacing: false,
            suspicious_patterns: Vec::new(),
            confidence: Confidence::Low,
        }
    }
}

/// The sole output of the engine and the sole input to any presentation layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrubResult {
    pub original: String,
    pub cleaned: String,
    pub stats: ScrubStats,
    /// Sorted by count descending; ties keep first-encountered order.
    pub detected_watermarks: Vec<DetectedWatermark>,
    pub analysis: Analysis,
}
