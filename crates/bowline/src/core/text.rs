//! Text measurement, wrapping, and truncation
//!
//! Widths are display columns per `unicode-width`, not byte or char counts.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a string in terminal columns.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Wrap text to fit within a maximum width, breaking on word boundaries.
///
/// Returns one line per element. If `max_width` is 0 or the text already
/// fits, the text comes back as a single line.
pub fn wrap_label(label: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 || UnicodeWidthStr::width(label) <= max_width {
        return vec![label.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;

    for word in label.split_whitespace() {
        let word_width = UnicodeWidthStr::width(word);

        if current_width == 0 {
            current_line = word.to_string();
            current_width = word_width;
        } else if current_width + 1 + word_width <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(current_line);
            current_line = word.to_string();
            current_width = word_width;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}

/// Truncate text to `max_width` display columns, ending in an ellipsis.
///
/// The ASCII form uses `...`, the Unicode form `…`. Text that already fits
/// is returned unchanged. A `max_width` of 0 disables truncation.
pub fn truncate_label(label: &str, max_width: usize, ascii: bool) -> String {
    if max_width == 0 || UnicodeWidthStr::width(label) <= max_width {
        return label.to_string();
    }

    let ellipsis = if ascii { "..." } else { "…" };
    let ellipsis_width = UnicodeWidthStr::width(ellipsis);
    if max_width <= ellipsis_width {
        return ellipsis.chars().take(max_width).collect();
    }

    let budget = max_width - ellipsis_width;
    let mut kept = String::new();
    let mut width = 0;
    for c in label.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + w > budget {
            break;
        }
        kept.push(c);
        width += w;
    }
    let mut result = kept.trim_end().to_string();
    result.push_str(ellipsis);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_short_label() {
        assert_eq!(wrap_label("Hello", 20), vec!["Hello"]);
    }

    #[test]
    fn test_wrap_exact_fit() {
        assert_eq!(wrap_label("Hello", 5), vec!["Hello"]);
    }

    #[test]
    fn test_wrap_long_label() {
        assert_eq!(
            wrap_label("This is a long label", 10),
            vec!["This is a", "long label"]
        );
    }

    #[test]
    fn test_wrap_zero_width_disables() {
        assert_eq!(wrap_label("Hello World", 0), vec!["Hello World"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert_eq!(wrap_label("", 10), vec![""]);
    }

    #[test]
    fn test_truncate_fits() {
        assert_eq!(truncate_label("short", 10, true), "short");
    }

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_label("a very long label", 8, true), "a ver...");
    }

    #[test]
    fn test_truncate_unicode() {
        assert_eq!(truncate_label("a very long label", 8, false), "a very…");
    }

    #[test]
    fn test_truncate_tiny_budget() {
        assert_eq!(truncate_label("abcdef", 2, true), "..");
        assert_eq!(truncate_label("abcdef", 1, false), "…");
    }

    #[test]
    fn test_truncate_wide_chars() {
        // Fullwidth characters occupy two columns each
        let out = truncate_label("日本語テスト", 7, false);
        assert!(display_width(&out) <= 7);
        assert!(out.ends_with('…'));
    }
}
