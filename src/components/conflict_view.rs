use std::collections::HashSet;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use similar::{ChangeTag, TextDiff};

use super::choice_list::choice_lines;
use super::key_hints::{hint_line, separator};
use super::text_input::input_lines;
use super::text_region::{render_text, truncate_to_width, wrap_logical};
use super::Component;
use crate::state::{compose_frame, ResolveMode, ResolveState};
use crate::theme::Theme;
use crate::types::ConflictUnit;

const GUTTER: &str = "\u{2502} ";
const CHANGED_GUTTER: &str = "\u{2503} ";

pub struct ConflictView;

impl Component<ResolveState> for ConflictView {
    fn render(&self, frame: &mut Frame, area: Rect, state: &mut ResolveState) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let width = area.width;

        let unit = &state.unit;
        let theme = &state.theme;
        let mode = state.mode;
        let diff_marks = state.options.diff_marks;
        let content = state
            .viewport
            .content(width, |w| {
                build_content(unit, theme, mode, diff_marks, w as usize)
            })
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

/// Scrollable part: header, context and every candidate text.
pub fn build_content(
    unit: &ConflictUnit,
    theme: &Theme,
    mode: ResolveMode,
    diff_marks: bool,
    width: usize,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let mut header = vec![Span::styled(
        format!(" Resolve {} ", unit.identifier),
        Style::default()
            .fg(Color::Black)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )];
    if !unit.location.is_empty() {
        header.push(Span::styled(
            format!("  {}", unit.location),
            Style::default().fg(theme.secondary),
        ));
    }
    if mode == ResolveMode::Editing {
        header.push(Span::styled(
            "  [custom]",
            Style::default().fg(theme.warning),
        ));
    }
    lines.push(truncate_line(header, width));
    lines.push(Line::default());

    if !unit.context.trim().is_empty() {
        lines.push(section_title("Context", theme.text_muted, width));
        for text in render_text(&unit.context, width.saturating_sub(1)) {
            lines.push(Line::from(Span::styled(
                format!(" {text}"),
                Style::default().fg(theme.text_muted),
            )));
        }
        lines.push(Line::default());
    }

    let (changed_a, changed_b) = if diff_marks {
        changed_lines(&unit.side_a, &unit.side_b)
    } else {
        (HashSet::new(), HashSet::new())
    };

    lines.push(section_title("Ours", theme.ours_fg, width));
    lines.extend(candidate_block(&unit.side_a, &changed_a, theme.ours_fg, theme, width));
    lines.push(Line::default());

    lines.push(section_title("Theirs", theme.theirs_fg, width));
    lines.extend(candidate_block(&unit.side_b, &changed_b, theme.theirs_fg, theme, width));

    if let Some(ref suggestion) = unit.suggestion {
        lines.push(Line::default());
        lines.push(section_title("Suggestion", theme.suggestion_fg, width));
        lines.extend(candidate_block(
            suggestion,
            &HashSet::new(),
            theme.suggestion_fg,
            theme,
            width,
        ));
    }

    lines
}

/// Fixed part under the content: choice list or editor, plus key hints.
fn footer_lines(state: &ResolveState, width: usize) -> Vec<Line<'static>> {
    let theme = &state.theme;
    let mut lines = vec![separator(width, theme)];

    match state.mode {
        ResolveMode::Browsing => {
            lines.extend(choice_lines(&state.choices, width, theme));
            lines.push(hint_line(
                &[
                    ("\u{2191}/\u{2193}", "move"),
                    ("Enter", "choose"),
                    ("PgUp/PgDn", "scroll"),
                    ("Esc", "skip"),
                ],
                theme,
            ));
        }
        ResolveMode::Editing => {
            lines.push(Line::from(Span::styled(
                " Custom resolution:",
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.extend(input_lines(
                state.editor.text(),
                state.editor.cursor_position(),
                width,
                state.options.editor_rows,
                Style::default().fg(theme.text),
            ));
            lines.push(hint_line(
                &[("Enter", "save"), ("S-Enter/C-j", "newline"), ("Esc", "back")],
                theme,
            ));
        }
    }
    lines
}

fn section_title(title: &str, color: Color, width: usize) -> Line<'static> {
    Line::from(Span::styled(
        truncate_to_width(&format!(" {title}"), width),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

/// Gutter-prefixed candidate text. Lines in `changed` get a heavier bar.
fn candidate_block(
    text: &str,
    changed: &HashSet<usize>,
    color: Color,
    theme: &Theme,
    width: usize,
) -> Vec<Line<'static>> {
    let inner = width.saturating_sub(GUTTER.chars().count());
    let wrapped = wrap_logical(text, inner);
    if wrapped.is_empty() {
        return vec![Line::from(vec![
            Span::styled(GUTTER, Style::default().fg(color)),
            Span::styled(
                truncate_to_width("(empty)", inner),
                Style::default()
                    .fg(theme.text_muted)
                    .add_modifier(Modifier::ITALIC),
            ),
        ])];
    }

    wrapped
        .into_iter()
        .map(|line| {
            let (gutter, gutter_style) = if changed.contains(&line.logical) {
                (CHANGED_GUTTER, Style::default().fg(theme.changed_fg))
            } else {
                (GUTTER, Style::default().fg(color))
            };
            Line::from(vec![
                Span::styled(gutter, gutter_style),
                Span::styled(
                    truncate_to_width(&line.text, inner),
                    Style::default().fg(theme.text),
                ),
            ])
        })
        .collect()
}

/// Logical line indices that differ between `a` and `b`, per side.
pub fn changed_lines(a: &str, b: &str) -> (HashSet<usize>, HashSet<usize>) {
    let diff = TextDiff::from_lines(a, b);
    let mut in_a = HashSet::new();
    let mut in_b = HashSet::new();
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Delete => {
                if let Some(i) = change.old_index() {
                    in_a.insert(i);
                }
            }
            ChangeTag::Insert => {
                if let Some(i) = change.new_index() {
                    in_b.insert(i);
                }
            }
            ChangeTag::Equal => {}
        }
    }
    (in_a, in_b)
}

fn truncate_line(spans: Vec<Span<'static>>, width: usize) -> Line<'static> {
    let mut remaining = width;
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if remaining == 0 {
            break;
        }
        let text = truncate_to_width(&span.content, remaining);
        remaining -= unicode_width::UnicodeWidthStr::width(text.as_str());
        out.push(Span::styled(text, span.style));
    }
    Line::from(out)
}
