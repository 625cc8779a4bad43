//! Per-character category decisions for characters already known to be
//! watermarks, plus the display-form rule used when reporting them.

use crate::table;
use crate::types::Category;

/// Zero-width and bidi control characters.
#[inline]
pub fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{206A}'..='\u{206F}'
            | '\u{FEFF}'
            | '\u{061C}'
            | '\u{034F}'
    )
}

/// Invisible characters that occupy no rendered width and are deleted outright
/// during scrubbing.
///
/// Deliberately narrower than `is_invisible`: the symmetric-swapping and
/// digit-shape controls U+206A–U+206F categorize as Invisible but are replaced
/// with a space, not deleted.
#[inline]
pub fn is_zero_width(c: char) -> bool {
    matches!(
        c,
        '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{FEFF}'
            | '\u{061C}'
            | '\u{034F}'
    )
}

/// Unusual spacing characters.
#[inline]
pub fn is_suspicious_spacing(c: char) -> bool {
    matches!(
        c,
        '\u{00A0}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}' | '\u{3000}' | '\u{180E}'
    )
}

/// Category for a watermark character. First match wins; a character may
/// satisfy more than one structural test, so the order here is load-bearing.
pub fn categorize(c: char) -> Category {
    let code = c as u32;
    if code <= 0x1F || (0x7F..=0x9F).contains(&code) {
        Category::Control
    } else if is_invisible(c) {
        Category::Invisible
    } else if is_suspicious_spacing(c) {
        Category::SuspiciousSpacing
    } else {
        Category::OtherSuspicious
    }
}

/// Display form of a character for reports: control and invisible characters
/// render as `<U+XXXX>`, plain space as `<SPACE>`, no-break space as `<NBSP>`,
/// everything else as itself.
pub fn visible_representation(c: char) -> String {
    let code = c as u32;
    if code < 32 || code == 127 || is_invisible(c) {
        format!("<{}>", table::unicode_point(c))
    } else if c == ' ' {
        "<SPACE>".to_string()
    } else if c == '\u{00A0}' {
        "<NBSP>".to_string()
    } else {
        c.to_string()
    }
}
