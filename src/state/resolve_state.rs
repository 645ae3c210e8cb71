use tracing::debug;

use super::{ChoiceState, EditorSignal, InlineEditor, ViewportState};
use crate::action::Action;
use crate::config::UiOptions;
use crate::event::KeyContext;
use crate::theme::Theme;
use crate::types::{ChosenOption, ConflictUnit, ResolutionOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// Choice list active.
    Browsing,
    /// Free-text entry for a custom resolution.
    Editing,
}

/// One resolution session over a single conflict unit.
pub struct ResolveState {
    pub unit: ConflictUnit,
    pub choices: ChoiceState,
    pub mode: ResolveMode,
    pub editor: InlineEditor,
    pub viewport: ViewportState,
    pub theme: Theme,
    pub options: UiOptions,
}

impl ResolveState {
    pub fn new(unit: ConflictUnit, theme: Theme, options: UiOptions) -> Self {
        let choices = ChoiceState::for_conflict(unit.suggestion.is_some());
        Self {
            unit,
            choices,
            mode: ResolveMode::Browsing,
            editor: InlineEditor::new(true),
            viewport: ViewportState::new(),
            theme,
            options,
        }
    }

    pub fn key_context(&self) -> KeyContext {
        match self.mode {
            ResolveMode::Editing => KeyContext::Editing,
            ResolveMode::Browsing => KeyContext::Browsing {
                has_suggestion: self.unit.suggestion.is_some(),
            },
        }
    }

    /// Apply one action. Returns the outcome once the session is finished.
    pub fn update(&mut self, action: Action) -> Option<ResolutionOutcome> {
        if action == Action::Cancel {
            debug!(unit = %self.unit.identifier, "resolution cancelled");
            return Some(ResolutionOutcome::cancelled());
        }
        if action == Action::Resize {
            self.viewport.invalidate();
            return None;
        }

        match self.mode {
            ResolveMode::Editing => self.update_editing(action),
            ResolveMode::Browsing => self.update_browsing(action),
        }
    }

    fn update_browsing(&mut self, action: Action) -> Option<ResolutionOutcome> {
        match action {
            Action::ChoiceUp => self.choices.move_up(),
            Action::ChoiceDown => self.choices.move_down(),
            Action::PickOurs => return self.choose(ChosenOption::SideA),
            Action::PickTheirs => return self.choose(ChosenOption::SideB),
            Action::PickSuggestion => return self.choose(ChosenOption::Suggestion),
            Action::StartCustom => return self.choose(ChosenOption::Custom),
            Action::ConfirmChoice => return self.choose(self.choices.highlighted()),
            Action::ScrollLineUp => self.viewport.scroll_up(1),
            Action::ScrollLineDown => self.viewport.scroll_down(1),
            Action::ScrollPageUp => self.viewport.page_up(),
            Action::ScrollPageDown => self.viewport.page_down(),
            Action::ScrollTop => self.viewport.scroll_top(),
            Action::ScrollBottom => self.viewport.scroll_bottom(),
            _ => {}
        }
        None
    }

    fn update_editing(&mut self, action: Action) -> Option<ResolutionOutcome> {
        if action == Action::CancelEdit {
            self.leave_editing();
            return None;
        }
        match self.editor.handle_input(&action) {
            EditorSignal::Submitted(text) => {
                debug!(unit = %self.unit.identifier, "custom resolution submitted");
                Some(ResolutionOutcome::resolved(ChosenOption::Custom, text))
            }
            EditorSignal::EmptySubmit => {
                self.leave_editing();
                None
            }
            EditorSignal::Changed | EditorSignal::Ignored => None,
        }
    }

    /// Commit to `option`; "custom" opens the editor instead of finishing.
    fn choose(&mut self, option: ChosenOption) -> Option<ResolutionOutcome> {
        let text = match option {
            ChosenOption::SideA => self.unit.side_a.clone(),
            ChosenOption::SideB => self.unit.side_b.clone(),
            ChosenOption::Suggestion => self.unit.suggestion.clone()?,
            ChosenOption::Custom => {
                self.mode = ResolveMode::Editing;
                self.editor.clear();
                self.viewport.invalidate();
                debug!(unit = %self.unit.identifier, "editing custom resolution");
                return None;
            }
            ChosenOption::Cancelled => return Some(ResolutionOutcome::cancelled()),
        };
        debug!(unit = %self.unit.identifier, choice = option.label(), "resolution chosen");
        Some(ResolutionOutcome::resolved(option, text))
    }

    fn leave_editing(&mut self) {
        self.editor.clear();
        self.mode = ResolveMode::Browsing;
        self.viewport.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(suggestion: Option<&str>) -> ConflictUnit {
        ConflictUnit {
            identifier: "hunk-1".to_string(),
            location: "src/lib.rs:10".to_string(),
            context: "fn main() {".to_string(),
            side_a: "  let x = 1;\n".to_string(),
            side_b: "  let x = 2;\n".to_string(),
            suggestion: suggestion.map(str::to_string),
        }
    }

    fn state(suggestion: Option<&str>) -> ResolveState {
        ResolveState::new(unit(suggestion), Theme::default(), UiOptions::default())
    }

    fn type_str(state: &mut ResolveState, s: &str) -> Option<ResolutionOutcome> {
        let mut last = None;
        for c in s.chars() {
            last = state.update(Action::EditorChar(c));
        }
        last
    }

    #[test]
    fn test_shortcut_returns_exact_side_text() {
        let mut s = state(None);
        let outcome = s.update(Action::PickTheirs).unwrap();
        assert_eq!(outcome.chosen_option, ChosenOption::SideB);
        assert_eq!(outcome.resolved_text.as_deref(), Some("  let x = 2;\n"));

        let mut s = state(Some("  let x = 3;"));
        let outcome = s.update(Action::PickOurs).unwrap();
        assert_eq!(outcome.resolved_text.as_deref(), Some("  let x = 1;\n"));
    }

    #[test]
    fn test_enter_confirms_highlighted_suggestion() {
        let mut s = state(Some("merged"));
        let outcome = s.update(Action::ConfirmChoice).unwrap();
        assert_eq!(outcome, ResolutionOutcome::resolved(ChosenOption::Suggestion, "merged"));
    }

    #[test]
    fn test_enter_on_custom_opens_editor() {
        let mut s = state(None);
        s.update(Action::ChoiceDown);
        s.update(Action::ChoiceDown);
        assert_eq!(s.choices.highlighted(), ChosenOption::Custom);
        assert_eq!(s.update(Action::ConfirmChoice), None);
        assert_eq!(s.mode, ResolveMode::Editing);
    }

    #[test]
    fn test_custom_submit_trims() {
        let mut s = state(None);
        assert_eq!(s.update(Action::StartCustom), None);
        assert_eq!(type_str(&mut s, "  let x = 4;  "), None);
        let outcome = s.update(Action::SubmitEdit).unwrap();
        assert_eq!(outcome, ResolutionOutcome::resolved(ChosenOption::Custom, "let x = 4;"));
    }

    #[test]
    fn test_blank_custom_returns_to_browsing() {
        let mut s = state(None);
        s.update(Action::StartCustom);
        type_str(&mut s, "   ");
        assert_eq!(s.update(Action::SubmitEdit), None);
        assert_eq!(s.mode, ResolveMode::Browsing);
        assert_eq!(s.editor.text(), "");
    }

    #[test]
    fn test_escape_in_editor_discards_buffer() {
        let mut s = state(None);
        s.update(Action::StartCustom);
        type_str(&mut s, "draft");
        assert_eq!(s.update(Action::CancelEdit), None);
        assert_eq!(s.mode, ResolveMode::Browsing);
        s.update(Action::StartCustom);
        assert_eq!(s.editor.text(), "");
    }

    #[test]
    fn test_shortcut_letters_are_text_while_editing() {
        let mut s = state(Some("sugg"));
        s.update(Action::StartCustom);
        // mapped through the editing context, "o" is text, never PickOurs
        let action = crate::event::map_key_to_action(crate::event::Key::Char('o'), s.key_context());
        assert_eq!(s.update(action.unwrap()), None);
        assert_eq!(s.editor.text(), "o");
        // a stray browse action is ignored while editing
        assert_eq!(s.update(Action::PickTheirs), None);
        assert_eq!(s.mode, ResolveMode::Editing);
    }

    #[test]
    fn test_escape_while_browsing_cancels() {
        let mut s = state(None);
        let outcome = s.update(Action::Cancel).unwrap();
        assert!(outcome.is_cancelled());
        assert_eq!(outcome.resolved_text, None);
    }

    #[test]
    fn test_missing_suggestion_pick_is_noop() {
        let mut s = state(None);
        assert_eq!(s.update(Action::PickSuggestion), None);
        assert_eq!(s.mode, ResolveMode::Browsing);
    }

    #[test]
    fn test_mode_change_invalidates_cache() {
        let mut s = state(None);
        s.viewport.content(80, |_| Vec::new());
        assert!(s.viewport.is_cached());
        s.update(Action::StartCustom);
        assert!(!s.viewport.is_cached());
    }
}
