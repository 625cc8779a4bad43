//! Single-pass removal of watermark characters and whitespace normalization.

use crate::classifier;
use crate::table;
use crate::types::Category;

/// Per-category removal totals for one scrub pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    pub control: usize,
    pub invisible: usize,
    pub spacing: usize,
    pub suspicious: usize,
}

impl CategoryTotals {
    /// Total characters removed. Always equals the sum of the four counters.
    pub fn removed(&self) -> usize {
        self.control + self.invisible + self.spacing + self.suspicious
    }

    fn bump(&mut self, category: Category) {
        match category {
            Category::Control => self.control += 1,
            Category::Invisible => self.invisible += 1,
            Category::SuspiciousSpacing => self.spacing += 1,
            Category::OtherSuspicious => self.suspicious += 1,
        }
    }
}

/// Output of one scrub pass: cleaned text plus the raw counts the analyzer
/// consumes.
#[derive(Debug, Clone, Default)]
pub struct ScrubOutcome {
    pub cleaned: String,
    /// Occurrence count per distinct watermark character, in the order each
    /// character was first encountered.
    pub char_counts: Vec<(char, usize)>,
    pub totals: CategoryTotals,
}

/// Scrub the input in a single left-to-right pass.
///
/// Zero-width characters are deleted outright; every other watermark character
/// is replaced with an ordinary space so adjacent words do not join. The
/// buffer is whitespace-normalized afterwards.
pub fn scrub(text: &str) -> ScrubOutcome {
    if text.is_empty() {
        return ScrubOutcome::default();
    }

    let mut buffer = String::with_capacity(text.len());
    let mut char_counts: Vec<(char, usize)> = Vec::new();
    let mut totals = CategoryTotals::default();

    for c in text.chars() {
        if !table::is_watermark(c) {
            buffer.push(c);
            continue;
        }

        match char_counts.iter_mut().find(|(seen, _)| *seen == c) {
            Some((_, count)) => *count += 1,
            None => char_counts.push((c, 1)),
        }
        totals.bump(classifier::categorize(c));

        if !classifier::is_zero_width(c) {
            buffer.push(' ');
        }
    }

    ScrubOutcome {
        cleaned: normalize_whitespace(&buffer),
        char_counts,
        totals,
    }
}

/// Whitespace normalization, applied in this order:
/// (a) collapse runs of space/tab into a single space,
/// (b) strip space runs immediately following a line break,
/// (c) strip space runs immediately preceding a line break,
/// (d) trim leading/trailing whitespace.
///
/// (a) runs first because replacement spaces from the scrub pass can form new
/// runs adjacent to line breaks that (b)/(c) must then remove.
pub fn normalize_whitespace(input: &str) -> String {
    let mut collapsed = String::with_capacity(input.len());
    let mut in_run = false;
    for c in input.chars() {
        if c == ' ' || c == '\t' {
            if !in_run {
                collapsed.push(' ');
                in_run = true;
            }
        } else {
            collapsed.push(c);
            in_run = false;
        }
    }

    // After collapsing there are no space runs left, so adjacency checks only
    // ever see a single space between two non-space characters.
    let chars: Vec<char> = collapsed.chars().collect();
    let mut out = String::with_capacity(collapsed.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == ' ' {
            let after_break = i > 0 && matches!(chars[i - 1], '\n' | '\r');
            let before_break = matches!(chars.get(i + 1), Some('\n') | Some('\r'));
            if after_break || before_break {
                continue;
            }
        }
        out.push(c);
    }

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_untouched() {
        let outcome = scrub("Hello world");
        assert_eq!(outcome.cleaned, "Hello world");
        assert!(outcome.char_counts.is_empty());
        assert_eq!(outcome.totals.removed(), 0);
    }

    #[test]
    fn test_zero_width_deleted_outright() {
        let outcome = scrub("a\u{200B}b");
        assert_eq!(outcome.cleaned, "ab");
        assert_eq!(outcome.totals.invisible, 1);
        assert_eq!(outcome.char_counts, vec![('\u{200B}', 1)]);
    }

    #[test]
    fn test_spacing_replaced_with_space() {
        let outcome = scrub("a\u{00A0}b");
        assert_eq!(outcome.cleaned, "a b");
        assert_eq!(outcome.totals.spacing, 1);
    }

    #[test]
    fn test_digit_shape_controls_replaced_not_deleted() {
        // Invisible for categorization, replaced with a space during scrubbing.
        let outcome = scrub("a\u{206F}b");
        assert_eq!(outcome.cleaned, "a b");
        assert_eq!(outcome.totals.invisible, 1);
    }

    #[test]
    fn test_counts_keep_first_encountered_order() {
        let outcome = scrub("\u{00A0}\u{200B}\u{00A0}\u{2003}");
        let chars: Vec<char> = outcome.char_counts.iter().map(|&(c, _)| c).collect();
        assert_eq!(chars, vec!['\u{00A0}', '\u{200B}', '\u{2003}']);
        assert_eq!(outcome.char_counts[0].1, 2);
    }

    #[test]
    fn test_empty_input_short_circuits() {
        let outcome = scrub("");
        assert_eq!(outcome.cleaned, "");
        assert!(outcome.char_counts.is_empty());
    }

    #[test]
    fn test_all_watermark_input_cleans_to_empty() {
        let outcome = scrub("\u{200B}\u{FEFF}\u{200D}");
        assert_eq!(outcome.cleaned, "");
        assert_eq!(outcome.totals.invisible, 3);
    }

    #[test]
    fn test_collapse_horizontal_runs() {
        assert_eq!(normalize_whitespace("a    b"), "a b");
        assert_eq!(normalize_whitespace("a \t b"), "a b");
    }

    #[test]
    fn test_strip_spaces_after_newline() {
        assert_eq!(normalize_whitespace("a\n   b"), "a\nb");
    }

    #[test]
    fn test_strip_spaces_before_newline() {
        assert_eq!(normalize_whitespace("a   \nb"), "a\nb");
    }

    #[test]
    fn test_trim_whole_result() {
        assert_eq!(normalize_whitespace("  a b  "), "a b");
        assert_eq!(normalize_whitespace("\n a \n"), "a");
    }

    #[test]
    fn test_collapse_feeds_newline_stripping() {
        // The run collapses to one space which then sits before a newline and
        // must go too.
        assert_eq!(normalize_whitespace("a \t \nb"), "a\nb");
    }

    #[test]
    fn test_crlf_adjacency() {
        assert_eq!(normalize_whitespace("a \r\nb"), "a\r\nb");
        assert_eq!(normalize_whitespace("a\r\n b"), "a\r\nb");
    }
}
