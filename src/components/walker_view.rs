use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::confirm_submit::confirm_lines;
use super::key_hints::{hint_line, separator};
use super::text_input::input_lines;
use super::text_region::{render_block, truncate_to_width};
use super::Component;
use crate::state::{compose_frame, WalkerMode, WalkerState};
use crate::theme::Theme;
use crate::types::ExtractedItem;

pub struct WalkerView;

impl Component<WalkerState> for WalkerView {
    fn render(&self, frame: &mut Frame, area: Rect, state: &mut WalkerState) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let width = area.width;

        let item = state.current_item().clone();
        let position = (state.current_index(), state.items().len());
        let theme = &state.theme;
        let content = state
            .viewport
            .content(width, |w| build_content(&item, position, theme, w as usize))
            .to_vec();

        let footer = footer_lines(state, width as usize);
        let composed = compose_frame(
            &content,
            &footer,
            area.height as usize,
            state.viewport.scroll_offset,
            Style::default().fg(state.theme.text_muted),
        );
        state.viewport.apply(&composed);

        frame.render_widget(Paragraph::new(composed.lines), area);
    }
}

/// Scrollable part: position header, section label and the item's source text.
pub fn build_content(
    item: &ExtractedItem,
    (index, total): (usize, usize),
    theme: &Theme,
    width: usize,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled(
        truncate_to_width(&format!(" Item {} of {total} ", index + 1), width),
        Style::default()
            .fg(Color::Black)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::default());

    if !item.section_label.trim().is_empty() {
        lines.push(Line::from(Span::styled(
            truncate_to_width(&format!(" {}", item.section_label.trim()), width),
            Style::default()
                .fg(theme.secondary)
                .add_modifier(Modifier::BOLD),
        )));
    }

    let ordinal = format!(" {}. ", item.ordinal);
    let body = render_block(&item.body_text, "", width.saturating_sub(ordinal.len()));
    if body.is_empty() {
        lines.push(Line::from(vec![
            Span::styled(
                truncate_to_width(&ordinal, width),
                Style::default().fg(theme.accent),
            ),
            Span::styled(
                truncate_to_width("(no text)", width.saturating_sub(ordinal.len())),
                Style::default()
                    .fg(theme.text_muted)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]));
        return lines;
    }

    let indent = " ".repeat(ordinal.len());
    for (i, text) in body.into_iter().enumerate() {
        let lead = if i == 0 { ordinal.clone() } else { indent.clone() };
        lines.push(Line::from(vec![
            Span::styled(
                truncate_to_width(&lead, width),
                Style::default().fg(theme.accent),
            ),
            Span::styled(text, Style::default().fg(theme.text)),
        ]));
    }
    lines
}

fn footer_lines(state: &WalkerState, width: usize) -> Vec<Line<'static>> {
    let theme = &state.theme;
    let total = state.items().len();
    let answered = state.answered_count();
    let mut lines = vec![separator(width, theme)];

    if state.mode == WalkerMode::ConfirmingSubmit {
        lines.extend(confirm_lines(answered, total, theme));
        return lines;
    }

    lines.push(Line::from(vec![
        Span::styled(
            " Your response:",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {answered}/{total} answered"),
            Style::default().fg(theme.text_muted),
        ),
    ]));
    lines.extend(input_lines(
        state.editor.text(),
        state.editor.cursor_position(),
        width,
        state.options.editor_rows,
        Style::default().fg(theme.text),
    ));

    let forward = if state.is_last() { "finish" } else { "next" };
    lines.push(hint_line(
        &[
            ("Enter/Tab", forward),
            ("S-Tab", "back"),
            ("S-Enter/C-j", "newline"),
            ("Esc", "cancel"),
        ],
        theme,
    ));
    lines
}
