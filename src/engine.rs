//! Engine facade: runs the scrubber and analyzer over one input string and
//! assembles the structured result.

use crate::analyzer;
use crate::scrubber;
use crate::types::{Analysis, ScrubResult, ScrubStats};

/// Detect and strip watermark characters from `text`.
///
/// Total over all strings: empty input and input consisting solely of
/// watermark characters both produce a well-formed result (the cleaned text
/// may be empty). No shared state is written, so calls may run concurrently.
pub fn analyze_and_clean(text: &str) -> ScrubResult {
    if text.is_empty() {
        return ScrubResult {
            original: String::new(),
            cleaned: String::new(),
            stats: ScrubStats::default(),
            detected_watermarks: Vec::new(),
            analysis: Analysis::default(),
        };
    }

    let original_length = text.chars().count();
    let outcome = scrubber::scrub(text);
    let cleaned_length = outcome.cleaned.chars().count();
    let removed = outcome.totals.removed();

    let detected_watermarks = analyzer::build_detected(&outcome.char_counts);
    let analysis = analyzer::analyze(original_length, &detected_watermarks);

    let stats = ScrubStats {
        original_length,
        cleaned_length,
        characters_removed: removed,
        watermarks_detected: removed > 0,
        control_characters_found: outcome.totals.control,
        invisible_characters_found: outcome.totals.invisible,
        suspicious_characters_found: outcome.totals.suspicious,
        spacing_characters_found: outcome.totals.spacing,
        compression_ratio: compression_ratio(original_length, cleaned_length),
    };

    ScrubResult {
        original: text.to_string(),
        cleaned: outcome.cleaned,
        stats,
        detected_watermarks,
        analysis,
    }
}

/// Percent reduction in length, rounded to 2 decimal places. 0 when the
/// original is empty.
fn compression_ratio(original_length: usize, cleaned_length: usize) -> f64 {
    if original_length == 0 {
        return 0.0;
    }
    let ratio = (original_length as f64 - cleaned_length as f64) / original_length as f64 * 100.0;
    (ratio * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Confidence;

    #[test]
    fn test_empty_input_degenerate_result() {
        let result = analyze_and_clean("");
        assert_eq!(result.stats, ScrubStats::default());
        assert!(!result.stats.watermarks_detected);
        assert!(result.detected_watermarks.is_empty());
        assert_eq!(result.analysis.confidence, Confidence::Low);
        assert_eq!(result.stats.compression_ratio, 0.0);
    }

    #[test]
    fn test_hello_zero_width_world() {
        let result = analyze_and_clean("Hello\u{200B}world");
        assert_eq!(result.cleaned, "Helloworld");
        assert_eq!(result.stats.original_length, 11);
        assert_eq!(result.stats.characters_removed, 1);
        assert_eq!(result.stats.invisible_characters_found, 1);
        assert!(result.stats.watermarks_detected);
        // Density 1/11 = 9.09% which is above the 5% high threshold.
        assert_eq!(result.analysis.confidence, Confidence::High);
    }

    #[test]
    fn test_stats_invariant() {
        let result = analyze_and_clean("a\u{0007}b\u{200B}c\u{00A0}d\u{2014}e");
        let stats = &result.stats;
        assert_eq!(
            stats.characters_removed,
            stats.control_characters_found
                + stats.invisible_characters_found
                + stats.suspicious_characters_found
                + stats.spacing_characters_found
        );
        assert_eq!(stats.control_characters_found, 1);
        assert_eq!(stats.invisible_characters_found, 1);
        assert_eq!(stats.spacing_characters_found, 1);
        assert_eq!(stats.suspicious_characters_found, 1);
    }

    #[test]
    fn test_compression_ratio_two_decimals() {
        // 11 chars down to 10: 1/11 = 9.0909...% -> 9.09.
        let result = analyze_and_clean("Hello\u{200B}world");
        assert_eq!(result.stats.compression_ratio, 9.09);
    }

    #[test]
    fn test_preserved_only_input() {
        let result = analyze_and_clean("a b\tc\r\nd");
        assert_eq!(result.stats.characters_removed, 0);
        assert!(!result.stats.watermarks_detected);
        assert_eq!(result.cleaned, "a b c\r\nd");
    }

    #[test]
    fn test_watermark_only_input_cleans_to_empty() {
        let result = analyze_and_clean("\u{200B}\u{200B}\u{FEFF}");
        assert_eq!(result.cleaned, "");
        assert_eq!(result.stats.cleaned_length, 0);
        assert_eq!(result.stats.characters_removed, 3);
        assert_eq!(result.stats.compression_ratio, 100.0);
    }
}
