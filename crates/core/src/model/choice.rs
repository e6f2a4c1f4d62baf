use serde::{Deserialize, Serialize};

use crate::model::ids::ChoiceLabel;

/// One selectable answer for the current question.
///
/// `is_correct` is decided when the choice set is built and never re-derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerChoice {
    pub label: ChoiceLabel,
    pub text: String,
    pub is_correct: bool,
}

impl AnswerChoice {
    #[must_use]
    pub fn new(label: ChoiceLabel, text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            label,
            text: text.into(),
            is_correct,
        }
    }
}

/// Result of submitting an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub label: ChoiceLabel,
    pub is_correct: bool,
    pub correct_answer: String,
}
