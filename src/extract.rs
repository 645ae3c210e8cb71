//! Pull numbered items out of free-form markdown.
//!
//! Headings and bold-only lines set the current section label; `N.` or `N)`
//! at the start of a line opens item `N`. Everything else continues the
//! current item's body. Text before the first item is dropped.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::ExtractedItem;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s{0,3}#{1,6}\s+(.+?)\s*#*\s*$").expect("valid regex"));
static BOLD_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\*\*(.+?):?\*\*:?\s*$").expect("valid regex"));
static ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d{1,9})[.)]\s+(.*)$").expect("valid regex"));

pub fn extract_items(text: &str) -> Vec<ExtractedItem> {
    let mut items: Vec<ExtractedItem> = Vec::new();
    let mut section = String::new();
    let mut body: Option<Vec<&str>> = None;

    for line in text.lines() {
        if let Some(caps) = HEADING.captures(line) {
            finish(&mut items, &mut body);
            section = caps[1].trim().to_string();
            continue;
        }
        if let Some(caps) = BOLD_LABEL.captures(line) {
            finish(&mut items, &mut body);
            section = caps[1].trim().to_string();
            continue;
        }
        if let Some(caps) = ITEM.captures(line) {
            let Ok(ordinal) = caps[1].parse::<u32>() else {
                continue;
            };
            finish(&mut items, &mut body);
            items.push(ExtractedItem {
                ordinal,
                section_label: section.clone(),
                body_text: String::new(),
            });
            body = Some(vec![caps.get(2).map_or("", |m| m.as_str())]);
            continue;
        }
        if let Some(lines) = body.as_mut() {
            lines.push(line);
        }
    }
    finish(&mut items, &mut body);
    items
}

/// Close the open item, if any, with the body collected so far.
fn finish(items: &mut [ExtractedItem], body: &mut Option<Vec<&str>>) {
    if let (Some(lines), Some(item)) = (body.take(), items.last_mut()) {
        item.body_text = join_trimmed(&lines);
    }
}

/// Join body lines, dropping trailing blank lines and trailing whitespace.
fn join_trimmed(lines: &[&str]) -> String {
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map_or(0, |i| i + 1);
    lines[..end]
        .iter()
        .map(|l| l.trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}
