use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::model::AnswerOutcome;

/// Lifecycle state of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuizState {
    /// No questions loaded yet.
    Empty,
    /// A question is on screen.
    Active,
    /// Every question has been advanced past.
    Finished,
}

impl QuizState {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuizState::Empty => "empty",
            QuizState::Active => "active",
            QuizState::Finished => "finished",
        }
    }
}

impl std::fmt::Display for QuizState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened on one question once the session moved past it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub index: usize,
    /// `None` when the question was advanced past without an answer.
    pub outcome: Option<AnswerOutcome>,
}

impl QuestionResult {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.outcome.as_ref().is_some_and(|o| o.is_correct)
    }

    #[must_use]
    pub fn is_skipped(&self) -> bool {
        self.outcome.is_none()
    }
}

/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub correct: usize,
    pub is_finished: bool,
}

/// Score card for a finished session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    total: usize,
    correct: usize,
    skipped: usize,
    started_at: Option<DateTime<Utc>>,
    finished_at: DateTime<Utc>,
}

impl QuizSummary {
    /// Build a summary from the per-question results of a finished session.
    #[must_use]
    pub fn from_results(
        results: &[QuestionResult],
        started_at: Option<DateTime<Utc>>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        let correct = results.iter().filter(|r| r.is_correct()).count();
        let skipped = results.iter().filter(|r| r.is_skipped()).count();
        Self {
            total: results.len(),
            correct,
            skipped,
            started_at,
            finished_at,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn correct(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> usize {
        self.total - self.correct - self.skipped
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> DateTime<Utc> {
        self.finished_at
    }

    /// Wall time between the first question and completion. Zero for an empty batch.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started_at
            .map_or_else(Duration::zero, |started| self.finished_at - started)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ChoiceLabel;
    use crate::time::fixed_now;

    fn answered(index: usize, is_correct: bool) -> QuestionResult {
        QuestionResult {
            index,
            outcome: Some(AnswerOutcome {
                label: ChoiceLabel::new(0),
                is_correct,
                correct_answer: "x".into(),
            }),
        }
    }

    #[test]
    fn summary_counts_outcomes() {
        let now = fixed_now();
        let results = vec![
            answered(0, true),
            answered(1, false),
            QuestionResult {
                index: 2,
                outcome: None,
            },
            answered(3, true),
        ];

        let summary =
            QuizSummary::from_results(&results, Some(now), now + Duration::seconds(90));

        assert_eq!(summary.total(), 4);
        assert_eq!(summary.correct(), 2);
        assert_eq!(summary.incorrect(), 1);
        assert_eq!(summary.skipped(), 1);
        assert_eq!(summary.elapsed(), Duration::seconds(90));
    }

    #[test]
    fn empty_summary_has_zero_elapsed() {
        let summary = QuizSummary::from_results(&[], None, fixed_now());
        assert_eq!(summary.total(), 0);
        assert_eq!(summary.elapsed(), Duration::zero());
    }
}
