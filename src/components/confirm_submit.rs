use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use super::key_hints::hint_line;
use crate::theme::Theme;

/// Footer lines asking whether to submit the collected responses.
pub fn confirm_lines(answered: usize, total: usize, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        format!(" Submit {answered} of {total} responses?"),
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    ))];
    if answered == 0 {
        lines.push(Line::from(Span::styled(
            " Nothing answered; submitting will cancel.",
            Style::default().fg(theme.warning),
        )));
    }
    lines.push(hint_line(&[("Enter/y", "submit"), ("Esc/n", "keep editing")], theme));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_prompt_counts() {
        let lines = confirm_lines(2, 5, &Theme::default());
        assert_eq!(lines.len(), 2);
        assert_eq!(text(&lines[0]), " Submit 2 of 5 responses?");
    }

    #[test]
    fn test_warns_when_nothing_answered() {
        let lines = confirm_lines(0, 3, &Theme::default());
        assert_eq!(lines.len(), 3);
        assert!(text(&lines[1]).contains("cancel"));
    }
}
