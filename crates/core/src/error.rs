use thiserror::Error;

use crate::model::{ChoiceLabel, QuizState};

/// Errors surfaced by `QuizSession`. None of them mutate the session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot {operation} while the quiz is {state}")]
    InvalidState {
        operation: &'static str,
        state: QuizState,
    },

    #[error("no choice labelled {0} for the current question")]
    UnknownChoice(ChoiceLabel),
}
