use tracing::debug;

use super::{InlineEditor, ViewportState};
use crate::action::Action;
use crate::components::text_region::preview;
use crate::config::UiOptions;
use crate::event::KeyContext;
use crate::theme::Theme;
use crate::types::{ExtractedItem, WalkOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkerMode {
    Navigating,
    ConfirmingSubmit,
}

/// Walks an ordered list of items, collecting one free-text response each.
///
/// `responses` always has one slot per item. The editor holds the response
/// for `current` and is flushed into its slot before `current` changes and
/// before submission.
pub struct WalkerState {
    items: Vec<ExtractedItem>,
    responses: Vec<String>,
    current: usize,
    pub editor: InlineEditor,
    pub mode: WalkerMode,
    pub viewport: ViewportState,
    pub theme: Theme,
    pub options: UiOptions,
}

impl WalkerState {
    /// `None` when there is nothing to walk.
    pub fn new(items: Vec<ExtractedItem>, theme: Theme, options: UiOptions) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        let responses = vec![String::new(); items.len()];
        Some(Self {
            items,
            responses,
            current: 0,
            editor: InlineEditor::new(true),
            mode: WalkerMode::Navigating,
            viewport: ViewportState::new(),
            theme,
            options,
        })
    }

    pub fn items(&self) -> &[ExtractedItem] {
        &self.items
    }

    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_item(&self) -> &ExtractedItem {
        &self.items[self.current]
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.items.len()
    }

    /// Items with a non-blank response, counting the unflushed editor.
    pub fn answered_count(&self) -> usize {
        (0..self.items.len())
            .filter(|&i| {
                let text = if i == self.current {
                    self.editor.text()
                } else {
                    self.responses[i].as_str()
                };
                !text.trim().is_empty()
            })
            .count()
    }

    pub fn key_context(&self) -> KeyContext {
        match self.mode {
            WalkerMode::Navigating => KeyContext::Navigating,
            WalkerMode::ConfirmingSubmit => KeyContext::ConfirmingSubmit,
        }
    }

    pub fn update(&mut self, action: Action) -> Option<WalkOutcome> {
        match (self.mode, action) {
            (_, Action::Cancel) => {
                debug!(index = self.current, "walker cancelled");
                return Some(WalkOutcome::Cancelled);
            }
            (_, Action::Resize) => self.viewport.invalidate(),
            (WalkerMode::ConfirmingSubmit, Action::ConfirmSubmit) => return Some(self.submit()),
            (WalkerMode::ConfirmingSubmit, Action::DeclineSubmit) => {
                self.mode = WalkerMode::Navigating;
                self.viewport.invalidate();
            }
            (WalkerMode::ConfirmingSubmit, _) => {}
            (WalkerMode::Navigating, Action::NextItem) => self.go_next(),
            (WalkerMode::Navigating, Action::PrevItem) => self.go_prev(),
            (WalkerMode::Navigating, Action::ScrollLineUp) => self.viewport.scroll_up(1),
            (WalkerMode::Navigating, Action::ScrollLineDown) => self.viewport.scroll_down(1),
            (WalkerMode::Navigating, Action::ScrollPageUp) => self.viewport.page_up(),
            (WalkerMode::Navigating, Action::ScrollPageDown) => self.viewport.page_down(),
            (WalkerMode::Navigating, other) => {
                self.editor.handle_input(&other);
            }
        }
        None
    }

    fn flush(&mut self) {
        self.responses[self.current] = self.editor.text().to_string();
    }

    fn load(&mut self, index: usize) {
        self.current = index;
        let saved = self.responses[index].clone();
        self.editor.set_text(&saved);
        self.viewport.reset();
    }

    fn go_next(&mut self) {
        self.flush();
        if self.is_last() {
            self.mode = WalkerMode::ConfirmingSubmit;
            self.viewport.invalidate();
            debug!(answered = self.answered_count(), "walker asking to submit");
        } else {
            self.load(self.current + 1);
            debug!(index = self.current, "walker next item");
        }
    }

    fn go_prev(&mut self) {
        if self.current == 0 {
            return;
        }
        self.flush();
        self.load(self.current - 1);
        debug!(index = self.current, "walker previous item");
    }

    fn submit(&mut self) -> WalkOutcome {
        self.flush();
        if self.responses.iter().all(|r| r.trim().is_empty()) {
            debug!("walker submitted with no responses");
            return WalkOutcome::Cancelled;
        }
        WalkOutcome::Submitted {
            document: assemble_document(&self.items, &self.responses, self.options.preview_chars),
        }
    }
}

/// Build the composite answer document in original item order.
///
/// Items with a blank response are skipped. A section heading is emitted
/// whenever the section label changes from the previously emitted item.
pub fn assemble_document(
    items: &[ExtractedItem],
    responses: &[String],
    preview_chars: usize,
) -> String {
    let mut out = String::new();
    let mut last_section: Option<&str> = None;

    for (item, response) in items.iter().zip(responses) {
        let response = response.trim();
        if response.is_empty() {
            continue;
        }
        let section = item.section_label.trim();
        if last_section != Some(section) && !section.is_empty() {
            out.push_str(&format!("## {section}\n\n"));
        }
        last_section = Some(section);

        let source = preview(&item.body_text, preview_chars);
        if source.is_empty() {
            out.push_str(&format!("**{}.**\n", item.ordinal));
        } else {
            out.push_str(&format!("**{}. {source}**\n", item.ordinal));
        }
        out.push_str(response);
        out.push_str("\n\n");
    }

    let trimmed_len = out.trim_end().len();
    out.truncate(trimmed_len);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::text::Line;

    fn item(ordinal: u32, section: &str, text: &str) -> ExtractedItem {
        ExtractedItem {
            ordinal,
            section_label: section.to_string(),
            body_text: text.to_string(),
        }
    }

    fn walker(n: u32) -> WalkerState {
        let items = (1..=n).map(|i| item(i, "Q", &format!("question {i}"))).collect();
        WalkerState::new(items, Theme::default(), UiOptions::default()).unwrap()
    }

    fn type_str(w: &mut WalkerState, s: &str) {
        for c in s.chars() {
            w.update(Action::EditorChar(c));
        }
    }

    #[test]
    fn test_empty_items_rejected() {
        assert!(WalkerState::new(Vec::new(), Theme::default(), UiOptions::default()).is_none());
    }

    #[test]
    fn test_response_survives_navigation() {
        let mut w = walker(5);
        w.update(Action::NextItem);
        assert_eq!(w.current_index(), 1);
        type_str(&mut w, "second answer");
        w.update(Action::NextItem);
        w.update(Action::NextItem);
        assert_eq!(w.current_index(), 3);
        assert_eq!(w.editor.text(), "");
        w.update(Action::PrevItem);
        w.update(Action::PrevItem);
        assert_eq!(w.current_index(), 1);
        assert_eq!(w.editor.text(), "second answer");
        assert_eq!(w.responses().len(), 5);
    }

    #[test]
    fn test_item_change_invalidates_cache() {
        let mut w = walker(3);
        w.viewport.content(80, |_| vec![Line::from("item 1")]);
        w.viewport.scroll_offset = 4;
        w.update(Action::NextItem);
        assert!(!w.viewport.is_cached());
        assert_eq!(w.viewport.scroll_offset, 0);

        let lines = w.viewport.content(80, |_| vec![Line::from("item 2")]);
        assert_eq!(lines[0], Line::from("item 2"));
        w.update(Action::PrevItem);
        assert!(!w.viewport.is_cached());
    }

    #[test]
    fn test_prev_on_first_is_noop() {
        let mut w = walker(2);
        type_str(&mut w, "kept");
        w.update(Action::PrevItem);
        assert_eq!(w.current_index(), 0);
        assert_eq!(w.editor.text(), "kept");
    }

    #[test]
    fn test_next_on_last_asks_to_submit() {
        let mut w = walker(1);
        type_str(&mut w, "only");
        assert_eq!(w.update(Action::NextItem), None);
        assert_eq!(w.mode, WalkerMode::ConfirmingSubmit);
        assert_eq!(w.responses()[0], "only");
    }

    #[test]
    fn test_decline_keeps_index_and_buffer() {
        let mut w = walker(2);
        w.update(Action::NextItem);
        type_str(&mut w, "draft");
        w.update(Action::NextItem);
        w.update(Action::DeclineSubmit);
        assert_eq!(w.mode, WalkerMode::Navigating);
        assert_eq!(w.current_index(), 1);
        assert_eq!(w.editor.text(), "draft");
    }

    #[test]
    fn test_confirm_with_all_blank_cancels() {
        let mut w = walker(2);
        type_str(&mut w, "   ");
        w.update(Action::NextItem);
        w.update(Action::NextItem);
        assert_eq!(w.update(Action::ConfirmSubmit), Some(WalkOutcome::Cancelled));
    }

    #[test]
    fn test_confirm_submits_document() {
        let mut w = walker(2);
        type_str(&mut w, "yes");
        w.update(Action::NextItem);
        w.update(Action::NextItem);
        let outcome = w.update(Action::ConfirmSubmit).unwrap();
        assert_eq!(
            outcome.document(),
            Some("## Q\n\n**1. question 1**\nyes\n")
        );
    }

    #[test]
    fn test_escape_cancels_from_any_item() {
        let mut w = walker(3);
        type_str(&mut w, "lost");
        w.update(Action::NextItem);
        assert_eq!(w.update(Action::Cancel), Some(WalkOutcome::Cancelled));
    }

    #[test]
    fn test_typing_ignored_while_confirming() {
        let mut w = walker(1);
        w.update(Action::NextItem);
        w.update(Action::EditorChar('x'));
        assert_eq!(w.responses()[0], "");
        assert_eq!(w.editor.text(), "");
    }

    #[test]
    fn test_assemble_sections_and_skips() {
        let items = vec![item(1, "A", "x"), item(2, "A", "y"), item(3, "B", "z")];
        let responses = vec!["r1".to_string(), String::new(), "r3".to_string()];
        let doc = assemble_document(&items, &responses, 80);
        assert_eq!(doc, "## A\n\n**1. x**\nr1\n\n## B\n\n**3. z**\nr3\n");
        assert_eq!(doc.matches("## A").count(), 1);
        assert!(!doc.contains("**2."));
    }

    #[test]
    fn test_assemble_truncates_preview() {
        let items = vec![item(7, "", "a very long question body that keeps going")];
        let doc = assemble_document(&items, &["ok".to_string()], 10);
        assert_eq!(doc, "**7. a very lo\u{2026}**\nok\n");
    }

    #[test]
    fn test_answered_count_includes_editor() {
        let mut w = walker(3);
        type_str(&mut w, "a");
        assert_eq!(w.answered_count(), 1);
        w.update(Action::NextItem);
        type_str(&mut w, "b");
        assert_eq!(w.answered_count(), 2);
    }
}
