//! Wrap and truncate arbitrary multi-line text to a fixed column width.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const TAB_WIDTH: usize = 4;

/// One physical display line and the logical (source) line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedLine {
    pub logical: usize,
    pub text: String,
}

/// Wrap every logical line of `text` to `max_width` columns, breaking on
/// word boundaries where possible. Empty text yields no lines.
pub fn wrap_logical(text: &str, max_width: usize) -> Vec<WrappedLine> {
    let width = max_width.max(1);
    let mut out = Vec::new();
    for (logical, line) in text.lines().enumerate() {
        let expanded = line.replace('\t', &" ".repeat(TAB_WIDTH));
        if expanded.trim().is_empty() {
            out.push(WrappedLine {
                logical,
                text: String::new(),
            });
            continue;
        }
        for segment in textwrap::wrap(&expanded, width) {
            out.push(WrappedLine {
                logical,
                text: segment.into_owned(),
            });
        }
    }
    out
}

/// Plain wrapped lines.
pub fn render_text(text: &str, max_width: usize) -> Vec<String> {
    wrap_logical(text, max_width)
        .into_iter()
        .map(|l| truncate_to_width(&l.text, max_width))
        .collect()
}

/// Wrapped lines with `gutter` in front of each, never wider than `width`.
pub fn render_block(text: &str, gutter: &str, width: usize) -> Vec<String> {
    let inner = width.saturating_sub(gutter.width());
    wrap_logical(text, inner)
        .into_iter()
        .map(|l| truncate_to_width(&format!("{gutter}{}", l.text), width))
        .collect()
}

/// Cut `s` so its display width is at most `width`. Never wraps.
pub fn truncate_to_width(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

/// First line of `text`, cut to `max_chars` with an ellipsis when shortened.
pub fn preview(text: &str, max_chars: usize) -> String {
    let first = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("").trim();
    if first.chars().count() <= max_chars {
        return first.to_string();
    }
    let mut out: String = first.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('\u{2026}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_on_word_boundaries() {
        let lines = render_text("the quick brown fox", 10);
        assert_eq!(lines, vec!["the quick", "brown fox"]);
    }

    #[test]
    fn test_keeps_blank_lines_and_logical_index() {
        let wrapped = wrap_logical("a\n\nb b b", 3);
        let logical: Vec<usize> = wrapped.iter().map(|l| l.logical).collect();
        assert_eq!(logical, vec![0, 1, 2, 2]);
        assert_eq!(wrapped[1].text, "");
    }

    #[test]
    fn test_empty_text_renders_nothing() {
        assert!(render_text("", 20).is_empty());
        assert!(render_block("", "\u{2502} ", 20).is_empty());
    }

    #[test]
    fn test_block_never_exceeds_width() {
        let text = "宽字符宽字符宽字符 mixed with ascii words and averyveryverylongtoken";
        for width in 1..30 {
            for line in render_block(text, "\u{2502} ", width) {
                assert!(line.width() <= width, "{line:?} wider than {width}");
            }
        }
    }

    #[test]
    fn test_block_prefixes_gutter() {
        let lines = render_block("one\ntwo", "| ", 10);
        assert_eq!(lines, vec!["| one", "| two"]);
    }

    #[test]
    fn test_idempotent() {
        let text = "fn main() {\n\tprintln!(\"hi\");\n}";
        assert_eq!(render_block(text, "> ", 12), render_block(text, "> ", 12));
    }

    #[test]
    fn test_truncate_wide_chars() {
        assert_eq!(truncate_to_width("日本語", 5), "日本");
        assert_eq!(truncate_to_width("abc", 5), "abc");
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("\n  Short one  \nmore", 20), "Short one");
        assert_eq!(preview("abcdefghij", 5), "abcd\u{2026}");
        assert_eq!(preview("", 5), "");
    }
}
