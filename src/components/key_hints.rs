use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::theme::Theme;

/// `[key]label` pairs on one line, in the style of every modal footer.
pub fn hint_line(bindings: &[(&str, &str)], theme: &Theme) -> Line<'static> {
    let key_style = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(theme.text_muted);

    let mut spans = vec![Span::raw(" ")];
    for (key, label) in bindings {
        spans.push(Span::styled(format!("[{key}]"), key_style));
        spans.push(Span::styled(format!("{label}  "), label_style));
    }
    Line::from(spans)
}

/// A full-width horizontal rule.
pub fn separator(width: usize, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(theme.text_muted),
    ))
}
