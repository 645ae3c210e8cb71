use serde::{Deserialize, Serialize};

/// One decision point: two competing texts plus an optional suggested merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictUnit {
    pub identifier: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub context: String,
    /// "Ours".
    pub side_a: String,
    /// "Theirs".
    pub side_b: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChosenOption {
    SideA,
    SideB,
    Suggestion,
    Custom,
    Cancelled,
}

impl ChosenOption {
    pub fn label(&self) -> &'static str {
        match self {
            ChosenOption::SideA => "ours",
            ChosenOption::SideB => "theirs",
            ChosenOption::Suggestion => "suggestion",
            ChosenOption::Custom => "custom",
            ChosenOption::Cancelled => "cancelled",
        }
    }
}

/// Result of one resolution session. `resolved_text` is `None` only when cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionOutcome {
    pub chosen_option: ChosenOption,
    pub resolved_text: Option<String>,
}

impl ResolutionOutcome {
    pub fn resolved(chosen_option: ChosenOption, text: impl Into<String>) -> Self {
        Self {
            chosen_option,
            resolved_text: Some(text.into()),
        }
    }

    pub fn cancelled() -> Self {
        Self {
            chosen_option: ChosenOption::Cancelled,
            resolved_text: None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.chosen_option == ChosenOption::Cancelled
    }
}

/// A numbered item pulled out of free-form text, answered by the walker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedItem {
    pub ordinal: u32,
    #[serde(default)]
    pub section_label: String,
    #[serde(default)]
    pub body_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WalkOutcome {
    Submitted { document: String },
    Cancelled,
}

impl WalkOutcome {
    pub fn document(&self) -> Option<&str> {
        match self {
            WalkOutcome::Submitted { document } => Some(document),
            WalkOutcome::Cancelled => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_unit_optional_fields_default() {
        let unit: ConflictUnit =
            serde_json::from_str(r#"{"identifier":"h1","side_a":"a","side_b":"b"}"#).unwrap();
        assert_eq!(unit.location, "");
        assert_eq!(unit.context, "");
        assert!(unit.suggestion.is_none());
    }

    #[test]
    fn test_cancelled_outcome_serializes_null_text() {
        let json = serde_json::to_value(ResolutionOutcome::cancelled()).unwrap();
        assert_eq!(json["chosen_option"], "cancelled");
        assert!(json["resolved_text"].is_null());
    }

    #[test]
    fn test_walk_outcome_tagged() {
        let json = serde_json::to_value(WalkOutcome::Submitted {
            document: "doc".to_string(),
        })
        .unwrap();
        assert_eq!(json["status"], "submitted");
        assert_eq!(json["document"], "doc");

        let json = serde_json::to_value(WalkOutcome::Cancelled).unwrap();
        assert_eq!(json["status"], "cancelled");
    }
}
