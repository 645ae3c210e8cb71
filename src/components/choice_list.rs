use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use super::text_region::truncate_to_width;
use crate::state::ChoiceState;
use crate::theme::Theme;

/// One line per choice; the highlighted entry gets a marker and accent colour,
/// and every entry shows its shortcut key.
pub fn choice_lines(choices: &ChoiceState, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    choices
        .choices()
        .iter()
        .enumerate()
        .map(|(idx, choice)| {
            let is_selected = idx == choices.highlighted_index();
            let prefix = if is_selected { " \u{25b6} " } else { "   " };
            let label_style = if is_selected {
                Style::default()
                    .fg(theme.accent)
                    .bg(theme.selection_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text)
            };
            let key_style = Style::default()
                .fg(theme.warning)
                .add_modifier(Modifier::BOLD);

            let shortcut = format!("[{}] ", choice.shortcut);
            let label_width = width.saturating_sub(prefix.chars().count() + shortcut.len());
            Line::from(vec![
                Span::styled(prefix, label_style),
                Span::styled(shortcut, key_style),
                Span::styled(truncate_to_width(choice.label, label_width), label_style),
            ])
        })
        .collect()
}
