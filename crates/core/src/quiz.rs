use chrono::{DateTime, Utc};
use log::{debug, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::fmt;

use crate::error::SessionError;
use crate::model::{
    AnswerChoice, AnswerOutcome, ChoiceLabel, QuestionRecord, QuestionResult, QuizProgress,
    QuizState, QuizSummary, RecordIssue,
};
use crate::settings::{QuizSettings, ReanswerPolicy};
use crate::shuffle::build_choices;
use crate::time::Clock;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz over one fetched batch of questions.
///
/// Starts `Empty`, is seeded once through [`QuizSession::initialize`], then
/// steps through the batch with [`QuizSession::submit_answer`] and
/// [`QuizSession::advance`] until `Finished`. The choice set of the current
/// question is shuffled once per question and cached.
pub struct QuizSession {
    settings: QuizSettings,
    clock: Clock,
    rng: StdRng,
    state: QuizState,
    questions: Vec<QuestionRecord>,
    current: usize,
    choices: Vec<AnswerChoice>,
    last_result: Option<AnswerOutcome>,
    results: Vec<QuestionResult>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Create an empty session shuffling with OS-seeded randomness.
    #[must_use]
    pub fn new(settings: QuizSettings) -> Self {
        Self::with_rng(settings, StdRng::from_os_rng())
    }

    /// Create an empty session with a reproducible shuffle sequence.
    #[must_use]
    pub fn with_seed(settings: QuizSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: QuizSettings, rng: StdRng) -> Self {
        Self {
            settings,
            clock: Clock::default(),
            rng,
            state: QuizState::Empty,
            questions: Vec::new(),
            current: 0,
            choices: Vec::new(),
            last_result: None,
            results: Vec::new(),
            started_at: None,
            finished_at: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Load the question batch. Only allowed once, from `Empty`.
    ///
    /// An empty batch moves straight to `Finished`. Malformed records are
    /// logged and kept.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` if the session was already initialized.
    pub fn initialize(&mut self, mut questions: Vec<QuestionRecord>) -> Result<QuizState, SessionError> {
        if self.state != QuizState::Empty {
            return Err(self.invalid("initialize"));
        }

        if self.settings.shuffle_questions {
            questions.shuffle(&mut self.rng);
        }

        let now = self.clock.now();
        self.questions = questions;
        self.current = 0;

        for (index, issue) in self.record_issues() {
            warn!("question {} is malformed: {issue}", index + 1);
        }

        if let Some(first) = self.questions.first() {
            self.choices = build_choices(first, &mut self.rng);
            self.started_at = Some(now);
            self.state = QuizState::Active;
        } else {
            self.finished_at = Some(now);
            self.state = QuizState::Finished;
        }

        debug!(
            "quiz initialized with {} question(s), state={}",
            self.questions.len(),
            self.state
        );
        Ok(self.state)
    }

    #[must_use]
    pub fn state(&self) -> QuizState {
        self.state
    }

    /// Position of the current question; equals `total_questions()` once finished.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state == QuizState::Finished
    }

    /// Outcome of the latest submission on the current question, if any.
    #[must_use]
    pub fn last_result(&self) -> Option<&AnswerOutcome> {
        self.last_result.as_ref()
    }

    /// Shape problems in the loaded batch, keyed by play order.
    #[must_use]
    pub fn record_issues(&self) -> Vec<(usize, RecordIssue)> {
        self.questions
            .iter()
            .enumerate()
            .flat_map(|(index, record)| record.issues().into_iter().map(move |issue| (index, issue)))
            .collect()
    }

    /// One entry per question already advanced past.
    #[must_use]
    pub fn results(&self) -> &[QuestionResult] {
        &self.results
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` unless the session is `Active`.
    pub fn current_question(&self) -> Result<&QuestionRecord, SessionError> {
        self.require_active("read the current question")?;
        self.questions
            .get(self.current)
            .ok_or_else(|| self.invalid("read the current question"))
    }

    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` unless the session is `Active`.
    pub fn current_prompt(&self) -> Result<&str, SessionError> {
        self.current_question().map(QuestionRecord::prompt)
    }

    /// The shuffled choices for the current question, stable until `advance`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` unless the session is `Active`.
    pub fn current_choices(&self) -> Result<&[AnswerChoice], SessionError> {
        self.require_active("read the current choices")?;
        Ok(&self.choices)
    }

    /// Judge the choice with the given label against the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` unless the session is `Active`, and
    /// `SessionError::UnknownChoice` if no current choice carries `label`.
    pub fn submit_answer(&mut self, label: ChoiceLabel) -> Result<AnswerOutcome, SessionError> {
        let record = self.current_question()?;
        let choice = self
            .choices
            .iter()
            .find(|choice| choice.label == label)
            .ok_or(SessionError::UnknownChoice(label))?;

        if self.settings.reanswer == ReanswerPolicy::KeepFirst {
            if let Some(first) = &self.last_result {
                return Ok(first.clone());
            }
        }

        let outcome = AnswerOutcome {
            label,
            is_correct: choice.is_correct,
            correct_answer: record.correct_answer().to_string(),
        };
        debug!(
            "question {} answered with {label}: correct={}",
            self.current, outcome.is_correct
        );
        self.last_result = Some(outcome.clone());
        Ok(outcome)
    }

    /// Move past the current question, answered or not.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidState` unless the session is `Active`.
    pub fn advance(&mut self) -> Result<QuizState, SessionError> {
        self.require_active("advance")?;

        self.results.push(QuestionResult {
            index: self.current,
            outcome: self.last_result.take(),
        });

        let next = self.current + 1;
        if let Some(record) = self.questions.get(next) {
            self.choices = build_choices(record, &mut self.rng);
        } else {
            self.choices.clear();
            self.finished_at = Some(self.clock.now());
            self.state = QuizState::Finished;
        }
        self.current = next;

        debug!("quiz advanced to {}/{}", self.current, self.questions.len());
        Ok(self.state)
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let pending = self.last_result.iter();
        let answered = self
            .results
            .iter()
            .filter_map(|r| r.outcome.as_ref())
            .chain(pending.clone())
            .count();
        let correct = self
            .results
            .iter()
            .filter_map(|r| r.outcome.as_ref())
            .chain(pending)
            .filter(|o| o.is_correct)
            .count();

        QuizProgress {
            total: self.questions.len(),
            answered,
            remaining: self.questions.len().saturating_sub(self.current),
            correct,
            is_finished: self.is_finished(),
        }
    }

    /// Score card, available once the session is `Finished`.
    #[must_use]
    pub fn summary(&self) -> Option<QuizSummary> {
        let finished_at = self.finished_at.filter(|_| self.is_finished())?;
        Some(QuizSummary::from_results(
            &self.results,
            self.started_at,
            finished_at,
        ))
    }

    fn require_active(&self, operation: &'static str) -> Result<(), SessionError> {
        if self.state == QuizState::Active {
            Ok(())
        } else {
            Err(self.invalid(operation))
        }
    }

    fn invalid(&self, operation: &'static str) -> SessionError {
        SessionError::InvalidState {
            operation,
            state: self.state,
        }
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(QuizSettings::default())
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("state", &self.state)
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("choices_len", &self.choices.len())
            .field("last_result", &self.last_result)
            .field("results_len", &self.results.len())
            .field("started_at", &self.started_at)
            .field("finished_at", &self.finished_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
