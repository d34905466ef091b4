//! Text cleanup helpers shared by the scrapers.

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters allowed through [`clean_text`]: word characters, whitespace,
/// and `,` `.` `-` `:` `/`. Everything else (icon glyphs, smart quotes,
/// zero-width junk) is stripped.
static DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s,.\-:/]").unwrap());

/// Strip every character outside the restricted set, then trim.
///
/// The Hacker News prepends icon glyphs to its date and tag spans; this
/// removes them so the remaining text can be compared and stored verbatim.
pub fn clean_text(text: &str) -> String {
    DISALLOWED.replace_all(text, "").trim().to_string()
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to `max` characters with an ellipsis and
/// byte count indicator appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}…(+{} bytes)", &s[..max], s.len() - max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_strips_icon_glyphs() {
        assert_eq!(clean_text("\u{f017} Mar 01, 2024"), "Mar 01, 2024");
        assert_eq!(
            clean_text("\u{f02b} Vulnerability / Zero-Day"),
            "Vulnerability / Zero-Day"
        );
    }

    #[test]
    fn test_clean_text_keeps_restricted_set() {
        assert_eq!(
            clean_text("CVE-2024-1234: patch v1.2, see https://example.com/x"),
            "CVE-2024-1234: patch v1.2, see https://example.com/x"
        );
    }

    #[test]
    fn test_clean_text_strips_quotes_and_symbols() {
        assert_eq!(
            clean_text("\u{201c}Smart\u{201d} quotes & symbols!"),
            "Smart quotes  symbols"
        );
    }

    #[test]
    fn test_clean_text_trims() {
        assert_eq!(clean_text("  padded  "), "padded");
        assert_eq!(clean_text("★★★"), "");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }
}
