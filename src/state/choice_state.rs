use crate::types::ChosenOption;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub key: ChosenOption,
    pub label: &'static str,
    pub shortcut: char,
}

/// Ordered, mutually exclusive options with exactly one highlighted entry.
#[derive(Debug, Clone)]
pub struct ChoiceState {
    choices: Vec<Choice>,
    highlighted: usize,
}

impl ChoiceState {
    /// Ours / theirs / (suggestion) / custom. The suggestion, when present,
    /// starts highlighted; otherwise "ours" does.
    pub fn for_conflict(has_suggestion: bool) -> Self {
        let mut choices = vec![
            Choice {
                key: ChosenOption::SideA,
                label: "Keep ours",
                shortcut: 'o',
            },
            Choice {
                key: ChosenOption::SideB,
                label: "Keep theirs",
                shortcut: 't',
            },
        ];
        if has_suggestion {
            choices.push(Choice {
                key: ChosenOption::Suggestion,
                label: "Use suggestion",
                shortcut: 's',
            });
        }
        choices.push(Choice {
            key: ChosenOption::Custom,
            label: "Write custom",
            shortcut: 'c',
        });

        let highlighted = if has_suggestion {
            choices
                .iter()
                .position(|c| c.key == ChosenOption::Suggestion)
                .unwrap_or(0)
        } else {
            0
        };
        Self {
            choices,
            highlighted,
        }
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn highlighted_index(&self) -> usize {
        self.highlighted
    }

    pub fn highlighted(&self) -> ChosenOption {
        self.choices[self.highlighted].key
    }

    pub fn move_up(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        self.highlighted = (self.highlighted + 1).min(self.choices.len() - 1);
    }

    pub fn select_by_shortcut(&self, c: char) -> Option<ChosenOption> {
        self.choices
            .iter()
            .find(|choice| choice.shortcut == c)
            .map(|choice| choice.key)
    }
}
