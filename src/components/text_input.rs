use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthChar;

struct InputRow {
    text: String,
    /// Char index of the cursor within this row, if it sits here.
    cursor: Option<usize>,
}

/// Lay out editor text as at most `max_rows` display lines of `width` columns.
/// Supports embedded newlines; the row holding the cursor is always visible.
pub fn input_lines(
    text: &str,
    cursor: (usize, usize),
    width: usize,
    max_rows: usize,
    style: Style,
) -> Vec<Line<'static>> {
    if width < 3 || max_rows == 0 {
        return Vec::new();
    }
    // 1 column left padding, 1 column so the cursor fits after the last char
    let inner_width = width - 2;

    let mut rows: Vec<InputRow> = Vec::new();
    let mut cursor_row = 0;
    for (line_idx, line) in text.split('\n').enumerate() {
        let chars: Vec<char> = line.chars().collect();
        let chunks = chunk_by_width(&chars, inner_width);
        let last = chunks.len() - 1;
        for (i, (start, end)) in chunks.into_iter().enumerate() {
            let holds_cursor = line_idx == cursor.0
                && cursor.1 >= start
                && (cursor.1 < end || (i == last && cursor.1 == end));
            if holds_cursor {
                cursor_row = rows.len();
            }
            rows.push(InputRow {
                text: chars[start..end].iter().collect(),
                cursor: holds_cursor.then(|| cursor.1 - start),
            });
        }
    }

    let scroll = (cursor_row + 1).saturating_sub(max_rows);
    let cursor_style = style.add_modifier(Modifier::REVERSED);

    rows.into_iter()
        .skip(scroll)
        .take(max_rows)
        .map(|row| match row.cursor {
            None => Line::from(Span::styled(format!(" {}", row.text), style)),
            Some(col) => {
                let before: String = row.text.chars().take(col).collect();
                let at = row.text.chars().nth(col);
                let after: String = row.text.chars().skip(col + 1).collect();
                let cursor_span = match at {
                    Some(c) => Span::styled(c.to_string(), cursor_style),
                    None => Span::styled("\u{2588}", style),
                };
                Line::from(vec![
                    Span::styled(format!(" {before}"), style),
                    cursor_span,
                    Span::styled(after, style),
                ])
            }
        })
        .collect()
}

/// Split chars into `[start, end)` ranges no wider than `width` columns.
/// An empty line yields a single empty range.
fn chunk_by_width(chars: &[char], width: usize) -> Vec<(usize, usize)> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut used = 0;
    for (i, c) in chars.iter().enumerate() {
        let w = c.width().unwrap_or(0);
        if used + w > width && i > start {
            chunks.push((start, i));
            start = i;
            used = 0;
        }
        used += w;
    }
    chunks.push((start, chars.len()));
    chunks
}
