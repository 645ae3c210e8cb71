use super::TextBuffer;
use crate::action::Action;

/// What the editor did with an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorSignal {
    /// Buffer or cursor changed.
    Changed,
    /// Submit requested with non-blank text (trimmed).
    Submitted(String),
    /// Submit requested but the buffer was blank.
    EmptySubmit,
    /// Not an editor action.
    Ignored,
}

/// Minimal text input. Cancel is the orchestrator's job, not the editor's.
#[derive(Debug, Clone, Default)]
pub struct InlineEditor {
    buffer: TextBuffer,
    multiline: bool,
}

impl InlineEditor {
    pub fn new(multiline: bool) -> Self {
        Self {
            buffer: TextBuffer::new(),
            multiline,
        }
    }

    pub fn text(&self) -> &str {
        self.buffer.text()
    }

    pub fn set_text(&mut self, text: &str) {
        if self.multiline {
            self.buffer.set(text);
        } else {
            self.buffer.set(&flatten(text));
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn cursor_position(&self) -> (usize, usize) {
        self.buffer.cursor_position()
    }

    pub fn handle_input(&mut self, action: &Action) -> EditorSignal {
        match action {
            Action::EditorChar(c) => self.buffer.insert_char(*c),
            Action::EditorPaste(text) => {
                let text = text.replace("\r\n", "\n").replace('\r', "\n");
                if self.multiline {
                    self.buffer.insert_str(&text);
                } else {
                    self.buffer.insert_str(&flatten(&text));
                }
            }
            Action::EditorNewline if self.multiline => self.buffer.insert_char('\n'),
            Action::EditorNewline => return EditorSignal::Ignored,
            Action::EditorBackspace => self.buffer.delete_back(),
            Action::EditorDelete => self.buffer.delete_forward(),
            Action::EditorDeleteWord => self.buffer.delete_word_back(),
            Action::EditorClearLine => self.buffer.delete_to_line_start(),
            Action::EditorLeft => self.buffer.move_left(),
            Action::EditorRight => self.buffer.move_right(),
            Action::EditorHome => self.buffer.move_home(),
            Action::EditorEnd => self.buffer.move_end(),
            Action::SubmitEdit => {
                return if self.buffer.is_blank() {
                    EditorSignal::EmptySubmit
                } else {
                    EditorSignal::Submitted(self.buffer.text().trim().to_string())
                };
            }
            _ => return EditorSignal::Ignored,
        }
        EditorSignal::Changed
    }
}

fn flatten(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(editor: &mut InlineEditor, s: &str) {
        for c in s.chars() {
            editor.handle_input(&Action::EditorChar(c));
        }
    }

    #[test]
    fn test_submit_trims() {
        let mut editor = InlineEditor::new(false);
        type_str(&mut editor, "  merged value  ");
        assert_eq!(
            editor.handle_input(&Action::SubmitEdit),
            EditorSignal::Submitted("merged value".to_string())
        );
    }

    #[test]
    fn test_blank_submit() {
        let mut editor = InlineEditor::new(true);
        type_str(&mut editor, "   ");
        editor.handle_input(&Action::EditorNewline);
        assert_eq!(
            editor.handle_input(&Action::SubmitEdit),
            EditorSignal::EmptySubmit
        );
    }

    #[test]
    fn test_newline_only_when_multiline() {
        let mut single = InlineEditor::new(false);
        assert_eq!(
            single.handle_input(&Action::EditorNewline),
            EditorSignal::Ignored
        );

        let mut multi = InlineEditor::new(true);
        type_str(&mut multi, "a");
        multi.handle_input(&Action::EditorNewline);
        type_str(&mut multi, "b");
        assert_eq!(multi.text(), "a\nb");
    }

    #[test]
    fn test_paste_flattens_single_line() {
        let mut editor = InlineEditor::new(false);
        editor.handle_input(&Action::EditorPaste("one\r\ntwo".to_string()));
        assert_eq!(editor.text(), "one two");

        let mut multi = InlineEditor::new(true);
        multi.handle_input(&Action::EditorPaste("one\r\ntwo".to_string()));
        assert_eq!(multi.text(), "one\ntwo");
    }

    #[test]
    fn test_non_editor_action_ignored() {
        let mut editor = InlineEditor::new(true);
        assert_eq!(
            editor.handle_input(&Action::ChoiceUp),
            EditorSignal::Ignored
        );
    }
}
