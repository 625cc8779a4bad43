//! Aggregates per-character counts into the detected-watermarks list and the
//! density-based analysis.

use crate::classifier;
use crate::table;
use crate::types::{Analysis, Category, Confidence, DetectedWatermark};

/// Density (percent) above which confidence is high.
const HIGH_DENSITY: f64 = 5.0;
/// Density (percent) above which confidence is at least medium.
const MEDIUM_DENSITY: f64 = 1.0;
/// More distinct watermark characters than this triggers the multiple-types
/// pattern.
const MULTIPLE_TYPES_THRESHOLD: usize = 5;
/// Any single character above this count, combined with invisible characters,
/// triggers the cluster pattern.
const CLUSTER_COUNT_THRESHOLD: usize = 10;

/// Map raw scrub counts to the public watermark shape, sorted by count
/// descending. The sort is stable, so ties keep first-encountered order.
pub fn build_detected(char_counts: &[(char, usize)]) -> Vec<DetectedWatermark> {
    let mut detected: Vec<DetectedWatermark> = char_counts
        .iter()
        .map(|&(c, count)| DetectedWatermark {
            character: classifier::visible_representation(c),
            unicode_point: table::unicode_point(c),
            name: table::name_of(c),
            count,
            category: classifier::categorize(c),
        })
        .collect();
    detected.sort_by(|a, b| b.count.cmp(&a.count));
    detected
}

/// Derive category flags, watermark density, confidence and pattern flags
/// from the detected list.
pub fn analyze(original_length: usize, detected: &[DetectedWatermark]) -> Analysis {
    let mut analysis = Analysis::default();

    for wm in detected {
        match wm.category {
            Category::Control => analysis.has_control_characters = true,
            Category::Invisible => analysis.has_invisible_characters = true,
            Category::SuspiciousSpacing => analysis.has_suspicious_spacing = true,
            Category::OtherSuspicious => {}
        }
    }

    if detected.is_empty() {
        return analysis;
    }

    let total_occurrences: usize = detected.iter().map(|wm| wm.count).sum();
    let density = watermark_density(total_occurrences, original_length);

    if density > HIGH_DENSITY {
        analysis
            .suspicious_patterns
            .push("High watermark density detected".to_string());
        analysis.confidence = Confidence::High;
    } else if density > MEDIUM_DENSITY {
        analysis.confidence = Confidence::Medium;
    }

    if detected.len() > MULTIPLE_TYPES_THRESHOLD {
        analysis
            .suspicious_patterns
            .push("Multiple watermark types detected".to_string());
    }

    if analysis.has_invisible_characters
        && detected.iter().any(|wm| wm.count > CLUSTER_COUNT_THRESHOLD)
    {
        analysis
            .suspicious_patterns
            .push("Clustered invisible characters detected".to_string());
    }

    analysis
}

/// Watermark occurrences as a percentage of the original text length.
/// Empty original text yields density 0 rather than dividing by zero.
pub fn watermark_density(total_occurrences: usize, original_length: usize) -> f64 {
    if original_length == 0 {
        return 0.0;
    }
    total_occurrences as f64 / original_length as f64 * 100.0
}
